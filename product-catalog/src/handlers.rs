//! Lifecycle handlers for the product resource
//!
//! Each handler validates its input, performs one store operation and maps
//! the outcome to a response. Failures are returned as [`Error`] and rendered
//! by its `IntoResponse` impl; nothing is caught here.

use axum::{extract::State, Json};
use tracing::{info, instrument};

use crate::{
    error::{ErrorResponse, Result},
    extract::{IdSegment, JsonBody},
    model::{Product, ProductCreate, ProductId, ProductUpdate},
    responses::{Created, NoContent},
    state::AppState,
    validation::{validate_create, validate_update},
};

/// Base path of the product collection
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// Collection path with a trailing slash, served like [`PRODUCTS_PATH`]
pub const PRODUCTS_PATH_SLASH: &str = "/api/v1/products/";

/// Path of a single product
pub const PRODUCT_PATH: &str = "/api/v1/products/{id}";

/// Get all products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    responses(
        (status = 200, description = "List of products", body = [Product])
    )
)]
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products().list()?;
    info!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Created<Product>> {
    let payload = validate_create(&body)?;
    let product = state.products().create(payload)?;

    info!(id = %product.id, name = %product.name, "Created product");

    let location = format!("{}/{}", PRODUCTS_PATH, product.id);
    Ok(Created::new(product).with_location(location))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    IdSegment(raw_id): IdSegment,
    JsonBody(body): JsonBody,
) -> Result<Json<Product>> {
    let patch = validate_update(&body)?;
    let id: ProductId = raw_id.parse()?;
    if patch.is_empty() {
        tracing::debug!(%id, "Update carries no fields");
    }
    let product = state.products().update(id, patch)?;

    info!(%id, "Updated product");
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(
        ("id" = u64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid product id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    IdSegment(raw_id): IdSegment,
) -> Result<NoContent> {
    let id: ProductId = raw_id.parse()?;
    state.products().delete(id)?;

    info!(%id, "Deleted product");
    Ok(NoContent)
}
