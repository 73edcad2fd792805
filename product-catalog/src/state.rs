//! Application state shared across handlers

use std::sync::Arc;

use crate::{config::Config, store::ProductStore};

/// Application state shared across handlers
///
/// Built once at startup and handed to the router; cloning is cheap.
#[derive(Clone, Default)]
pub struct AppState {
    config: Arc<Config>,
    products: ProductStore,
}

impl AppState {
    /// Create a new AppState with an empty product store
    pub fn new(config: Config) -> Self {
        Self::with_store(config, ProductStore::new())
    }

    /// Create a new AppState around an existing store
    pub fn with_store(config: Config, products: ProductStore) -> Self {
        Self {
            config: Arc::new(config),
            products,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the product store
    pub fn products(&self) -> &ProductStore {
        &self.products
    }
}
