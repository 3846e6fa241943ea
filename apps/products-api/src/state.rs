//! Application state management

use domain_products::InMemoryProductRepository;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Product store shared by every request; lives as long as the process
    pub products: InMemoryProductRepository,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config,
            products: InMemoryProductRepository::new(),
        }
    }
}
