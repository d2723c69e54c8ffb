// Blobgate - Minimal object storage gateway

pub mod config;
pub mod models;
pub mod routes;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use storage::{Backend, ObjectKey};

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
