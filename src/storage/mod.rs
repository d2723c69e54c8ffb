//! Storage layer
//!
//! A gateway runs with exactly one backend chosen at startup:
//! - `Local`: payloads live on the gateway's filesystem and are streamed back
//!   by the gateway itself.
//! - `Remote`: payloads live in an S3-compatible bucket and clients are
//!   redirected to a URL the object store serves.
//!
//! Retrieval is done by matching on the variant, so a local backend can only
//! be read and a remote backend can only be asked for a URL.

pub mod error;
pub mod key;
pub mod local;
pub mod s3_client;

pub use error::{StorageError, StorageResult};
pub use key::{KeyError, ObjectKey};
pub use local::LocalStorage;
pub use s3_client::S3Storage;

use tracing::info;

use crate::config::{StorageConfig, StorageKind};

pub enum Backend {
    Local(LocalStorage),
    Remote(S3Storage),
}

impl Backend {
    /// Set up the configured backend. Called once at startup.
    pub async fn init(config: &StorageConfig) -> StorageResult<Self> {
        let backend = match config.kind {
            StorageKind::Local => Backend::Local(LocalStorage::new(&config.data_dir).await?),
            StorageKind::Remote => Backend::Remote(S3Storage::new(&config.s3)?),
        };
        info!(backend = %backend.kind(), "Storage backend ready");
        Ok(backend)
    }

    pub async fn put(&self, key: &ObjectKey, data: &[u8]) -> StorageResult<()> {
        match self {
            Backend::Local(storage) => storage.put(key, data).await,
            Backend::Remote(storage) => storage.put(key, data).await,
        }
    }

    /// Whether the gateway serves payload bytes itself.
    pub fn is_local(&self) -> bool {
        matches!(self, Backend::Local(_))
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            Backend::Local(_) => StorageKind::Local,
            Backend::Remote(_) => StorageKind::Remote,
        }
    }
}
