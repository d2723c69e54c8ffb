use std::sync::Arc;

use crate::config::Config;
use crate::storage::Backend;
use crate::utils::PathResolver;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<Backend>,
    pub assets: PathResolver,
}

impl AppState {
    pub fn new(config: Config, backend: Backend) -> Self {
        let assets = PathResolver::new(config.ui.dir.clone());
        Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
            assets,
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub timestamp: String,
}
