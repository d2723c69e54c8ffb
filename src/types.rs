// Error types for the HTTP layer

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::storage::StorageError;
use crate::utils::ResolveError;

/// Body returned for failed store and retrieve calls
pub const FAIL_BODY: &str = "FAIL";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid request: {message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("Store failed: {0}")]
    Store(#[source] StorageError),

    #[error("Read failed: {0}")]
    Read(#[source] StorageError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Classify an error raised while storing an object.
    pub fn store(err: StorageError) -> Self {
        AppError::Store(err)
    }

    /// Classify an error raised while retrieving an object.
    pub fn read(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(key),
            other => AppError::Read(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InvalidRequest { status, .. } => *status,
            AppError::Store(_) | AppError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Rejections raised by axum extractors keep their status code.
impl From<BytesRejection> for AppError {
    fn from(err: BytesRejection) -> Self {
        AppError::InvalidRequest {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        AppError::InvalidRequest {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::InvalidRequest {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Forbidden(path) => AppError::Forbidden(path),
            ResolveError::NotFound(path) => AppError::NotFound(path),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Store(e) | AppError::Read(e) => error!(error = %e, "Storage backend failure"),
            AppError::Forbidden(path) => warn!(path = %path, "Rejected path traversal attempt"),
            AppError::InvalidRequest { message, .. } => warn!(error = %message, "Rejected request"),
            _ => {}
        }

        let body = match self {
            AppError::Forbidden(_) => "Forbidden",
            _ => FAIL_BODY,
        };
        (status, body).into_response()
    }
}
