use s3::error::S3Error;

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("failed to write object {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read object {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("object store error: {0}")]
    Remote(#[from] S3Error),

    #[error("object store rejected {operation} for {key} with status {status}")]
    RemoteStatus {
        operation: &'static str,
        key: String,
        status: u16,
    },

    #[error("storage initialization failed: {0}")]
    Init(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
