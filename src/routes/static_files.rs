//! User interface and static resources
//!
//! `/` serves `index.html` from the UI directory and `/c/...` serves any
//! other file below it. Request paths go through the `PathResolver` so
//! nothing outside the UI directory is reachable.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::fs;
use tracing::warn;

use crate::models::AppState;
use crate::types::{AppError, AppResult};

const INDEX_FILE: &str = "index.html";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/c/", get(serve_root))
        .route("/c/{*path}", get(serve_resource))
        .with_state(state)
}

async fn serve_index(State(state): State<AppState>) -> Response {
    let path = state.assets.root().join(INDEX_FILE);
    match fs::read_to_string(&path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read user interface");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Couldn't read user interface",
            )
                .into_response()
        }
    }
}

async fn serve_root(State(state): State<AppState>) -> AppResult<Response> {
    serve_file(&state, "").await
}

async fn serve_resource(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    serve_file(&state, &path).await
}

async fn serve_file(state: &AppState, requested: &str) -> AppResult<Response> {
    let file = state.assets.resolve(requested).await?;
    let content = fs::read(&file)
        .await
        .map_err(|_| AppError::NotFound(requested.to_string()))?;
    let mime = mime_guess::from_path(&file).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], content).into_response())
}
