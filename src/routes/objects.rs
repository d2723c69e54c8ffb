//! Object store and retrieve endpoints

use axum::{
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::models::AppState;
use crate::storage::{Backend, ObjectKey};
use crate::types::{AppError, AppResult};
use crate::utils::form_value;

/// Form field carrying the payload
const PAYLOAD_FIELD: &str = "r";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/store", post(store_object).put(store_object))
        .route("/get/", get(missing_key))
        .route("/get/{key}", get(get_object))
        .with_state(state)
}

async fn store_object(State(state): State<AppState>, request: Request) -> AppResult<String> {
    let payload = read_payload(&state, request).await?;
    let key = ObjectKey::generate();

    state
        .backend
        .put(&key, &payload)
        .await
        .map_err(AppError::store)?;

    info!(key = %key, bytes = payload.len(), backend = %state.backend.kind(), "Stored object");
    Ok(format!("OK:{key}"))
}

/// Pull field `r` out of a urlencoded or multipart form. The urlencoded body
/// is checked before the query string, and the first occurrence wins. A
/// missing field is an empty payload.
async fn read_payload(state: &AppState, request: Request) -> AppResult<Bytes> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let query = request.uri().query().map(str::to_owned);
        let body = Bytes::from_request(request, state).await?;
        let value = form_value(&body, PAYLOAD_FIELD)
            .or_else(|| query.and_then(|q| form_value(q.as_bytes(), PAYLOAD_FIELD)));
        return Ok(value.map(Bytes::from).unwrap_or_default());
    }

    if !content_type.starts_with("multipart/form-data") {
        return Err(AppError::InvalidRequest {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: format!("unsupported content type {content_type:?}"),
        });
    }

    let mut multipart = Multipart::from_request(request, state).await?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(PAYLOAD_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Ok(Bytes::new())
}

async fn get_object(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> AppResult<Response> {
    let key = ObjectKey::parse(&raw_key).map_err(|e| {
        debug!(key = %raw_key, error = %e, "Rejected malformed key");
        AppError::NotFound(raw_key.clone())
    })?;

    match state.backend.as_ref() {
        Backend::Local(storage) => {
            let data = storage.get(&key).await.map_err(AppError::read)?;
            Ok((
                [(header::CONTENT_TYPE, "application/octet-stream")],
                data,
            )
                .into_response())
        }
        Backend::Remote(storage) => {
            let url = storage.url(&key).await.map_err(AppError::read)?;
            debug!(key = %key, "Redirecting to object store");
            Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
        }
    }
}

async fn missing_key() -> AppError {
    AppError::NotFound(String::new())
}
