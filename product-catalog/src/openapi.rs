//! OpenAPI documentation
//!
//! The document is generated from the `#[utoipa::path]` annotations on the
//! handlers and the `ToSchema` derives on the model types, and served next to
//! a Swagger UI.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::DocsConfig,
    error::ErrorResponse,
    handlers,
    model::{Category, Product, ProductCreate, ProductId, ProductUpdate},
};

/// OpenAPI document for the product API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        description = "CRUD API for products with request validation"
    ),
    paths(
        handlers::list_products,
        handlers::create_product,
        handlers::update_product,
        handlers::delete_product,
    ),
    components(schemas(Product, ProductId, Category, ProductCreate, ProductUpdate, ErrorResponse)),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI document, stamped with this crate's version
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

/// Swagger UI plus the OpenAPI JSON document, mounted per `config`
pub fn docs_router<S>(config: &DocsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new(config.path.clone())
        .url(config.spec_path.clone(), api_doc())
        .into()
}
