//! Product resource types
//!
//! [`Product`] is the stored record. [`ProductCreate`] and [`ProductUpdate`]
//! are the payloads the validator hands to the store; they can only be built
//! from input that already passed validation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::Error;

/// Identifier assigned by the store
///
/// Parsing from a path segment is explicit and total: only a plain base-10
/// unsigned integer is accepted, anything else is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = u64, example = 1)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::validation("Invalid product id"));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| Error::validation("Invalid product id"))
    }
}

/// Closed set of product categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Clothing, Category::Books];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Books => "books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

/// A product record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    #[schema(example = "Smartphone")]
    pub name: String,

    #[schema(example = 599.99)]
    pub price: f64,

    pub category: Category,

    #[serde(serialize_with = "serialize_timestamp", deserialize_with = "deserialize_timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2023-08-20T12:34:56.789Z")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Overwrite the fields present in `patch`; `id` and `created_at` are kept.
    pub fn apply(&mut self, patch: ProductUpdate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Validated payload for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductCreate {
    #[schema(min_length = 3, max_length = 50, example = "Laptop")]
    pub name: String,

    #[schema(exclusive_minimum = 0.0, example = 1299.99)]
    pub price: f64,

    pub category: Category,
}

/// Validated partial payload for updating a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 3, max_length = 50, example = "Updated Laptop")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(exclusive_minimum = 0.0, example = 1399.99)]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ProductUpdate {
    /// True when the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none()
    }
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn laptop() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Laptop".to_string(),
            price: 1299.99,
            category: Category::Electronics,
            created_at: Utc.with_ymd_and_hms(2023, 8, 20, 12, 34, 56).unwrap()
                + chrono::Duration::milliseconds(789),
        }
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("1".parse::<ProductId>().unwrap(), ProductId::new(1));
        assert_eq!("0042".parse::<ProductId>().unwrap(), ProductId::new(42));

        for raw in ["", "abc", "1.5", "-1", "+1", " 1", "12abc", "99999999999999999999999"] {
            let err = raw.parse::<ProductId>().unwrap_err();
            assert!(
                matches!(err, Error::Validation { ref message, .. } if message == "Invalid product id"),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("Electronics".parse::<Category>().is_err());
        assert!("toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_serialization_shape() {
        let json = serde_json::to_value(laptop()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Laptop",
                "price": 1299.99,
                "category": "electronics",
                "createdAt": "2023-08-20T12:34:56.789Z"
            })
        );
    }

    #[test]
    fn test_product_deserializes_own_output() {
        let product = laptop();
        let json = serde_json::to_string(&product).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, product);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut product = laptop();
        let before = product.clone();

        product.apply(ProductUpdate {
            price: Some(999.99),
            ..Default::default()
        });

        assert_eq!(product.id, before.id);
        assert_eq!(product.created_at, before.created_at);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.category, Category::Electronics);
        assert_eq!(product.price, 999.99);
    }

    #[test]
    fn test_empty_update() {
        assert!(ProductUpdate::default().is_empty());
        assert!(!ProductUpdate {
            category: Some(Category::Books),
            ..Default::default()
        }
        .is_empty());
    }
}
