//! HTTP Routes
//!
//! - `/store` - Store a payload, answers `OK:<key>`
//! - `/get/{key}` - Retrieve a payload or redirect to it
//! - `/c/{path}` - Static resources
//! - `/health` - Health check
//! - `/` - User interface

pub mod health;
pub mod objects;
pub mod static_files;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let body_limit = state.config.server.max_payload_bytes;

    Router::new()
        .merge(objects::router(state.clone()))
        .merge(health::router(state.clone()))
        .merge(static_files::router(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
