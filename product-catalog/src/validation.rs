//! Request body validation for the product resource
//!
//! The validator works on the raw JSON value so that type mismatches,
//! missing fields and constraint violations are all reported the same way.
//! Failures are collected per field; the client only ever sees
//! [`INVALID_PRODUCT_DATA`], the field list goes to the logs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{Category, ProductCreate, ProductUpdate};

/// Message returned for every rejected product payload
pub const INVALID_PRODUCT_DATA: &str = "Invalid product data";

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error code (e.g., "REQUIRED", "INVALID_TYPE", "TOO_SHORT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Validate a create payload: `name`, `price` and `category` are all required.
pub fn validate_create(input: &Value) -> Result<ProductCreate> {
    let body = as_object(input)?;
    let mut errors = Vec::new();

    let name = require(body, "name", &mut errors).and_then(|v| check_name(v, &mut errors));
    let price = require(body, "price", &mut errors).and_then(|v| check_price(v, &mut errors));
    let category =
        require(body, "category", &mut errors).and_then(|v| check_category(v, &mut errors));

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) if errors.is_empty() => Ok(ProductCreate {
            name,
            price,
            category,
        }),
        _ => Err(Error::invalid_fields(INVALID_PRODUCT_DATA, errors)),
    }
}

/// Validate an update payload: every field is optional, `{}` is a no-op.
pub fn validate_update(input: &Value) -> Result<ProductUpdate> {
    let body = as_object(input)?;
    let mut errors = Vec::new();

    let update = ProductUpdate {
        name: body.get("name").and_then(|v| check_name(v, &mut errors)),
        price: body.get("price").and_then(|v| check_price(v, &mut errors)),
        category: body
            .get("category")
            .and_then(|v| check_category(v, &mut errors)),
    };

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(Error::invalid_fields(INVALID_PRODUCT_DATA, errors))
    }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>> {
    input.as_object().ok_or_else(|| {
        Error::invalid_fields(
            INVALID_PRODUCT_DATA,
            vec![FieldError::new(
                "body",
                "INVALID_TYPE",
                "Request body must be a JSON object",
            )],
        )
    })
}

fn require<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    let value = body.get(field);
    if value.is_none() {
        errors.push(FieldError::new(
            field,
            "REQUIRED",
            format!("{} is required", capitalize(field)),
        ));
    }
    value
}

fn check_name(value: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    let Some(name) = value.as_str() else {
        errors.push(FieldError::new("name", "INVALID_TYPE", "Name must be a string"));
        return None;
    };

    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        errors.push(FieldError::new(
            "name",
            "TOO_SHORT",
            format!("Name must be at least {} characters", NAME_MIN_LEN),
        ));
        return None;
    }
    if len > NAME_MAX_LEN {
        errors.push(FieldError::new(
            "name",
            "TOO_LONG",
            format!("Name must be at most {} characters", NAME_MAX_LEN),
        ));
        return None;
    }

    Some(name.to_string())
}

fn check_price(value: &Value, errors: &mut Vec<FieldError>) -> Option<f64> {
    let Some(price) = value.as_f64() else {
        errors.push(FieldError::new("price", "INVALID_TYPE", "Price must be a number"));
        return None;
    };

    if !price.is_finite() || price <= 0.0 {
        errors.push(FieldError::new(
            "price",
            "NOT_POSITIVE",
            "Price must be greater than 0",
        ));
        return None;
    }

    Some(price)
}

fn check_category(value: &Value, errors: &mut Vec<FieldError>) -> Option<Category> {
    let Some(raw) = value.as_str() else {
        errors.push(FieldError::new(
            "category",
            "INVALID_TYPE",
            "Category must be a string",
        ));
        return None;
    };

    match raw.parse::<Category>() {
        Ok(category) => Some(category),
        Err(()) => {
            let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
            errors.push(FieldError::new(
                "category",
                "INVALID_VALUE",
                format!("Category must be one of: {}", allowed.join(", ")),
            ));
            None
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
