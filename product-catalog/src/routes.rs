//! Route table

use axum::{
    routing::{get, put},
    Router,
};

use crate::{
    error::Error,
    handlers::{self, PRODUCTS_PATH, PRODUCTS_PATH_SLASH, PRODUCT_PATH},
    health::health,
    openapi::docs_router,
    state::AppState,
};

/// Build the application router with state applied
///
/// Product routes live under [`PRODUCTS_PATH`]. Unmatched paths and
/// unsupported methods answer with the error envelope instead of an empty
/// 404 or 405.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route(
            PRODUCTS_PATH,
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            PRODUCTS_PATH_SLASH,
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            PRODUCT_PATH,
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/health", get(health));

    if state.config().docs.enabled {
        app = app.merge(docs_router(&state.config().docs));
    }

    // Applies to every route registered above
    app.method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> Error {
    Error::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed("Method not allowed".to_string())
}
