//! # product-catalog
//!
//! In-memory product catalog served over HTTP: create, list, update and delete
//! products with validated JSON bodies, a uniform error envelope and generated
//! OpenAPI documentation.
//!
//! ## Endpoints
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/v1/products` | 200, all products in insertion order |
//! | POST | `/api/v1/products` | 201, the created product |
//! | PUT | `/api/v1/products/{id}` | 200, the merged product |
//! | DELETE | `/api/v1/products/{id}` | 204 |
//!
//! Every failure is answered with `{"success": false, "error": "<message>"}`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use product_catalog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let app = router(AppState::new(config.clone()));
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod model;
pub mod observability;
pub mod openapi;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::model::{Category, Product, ProductCreate, ProductId, ProductUpdate};
    pub use crate::observability::init_tracing;
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::store::ProductStore;
}
