//! Local filesystem storage backend
//!
//! Objects live at `{root}/{key}`. Writes go to a hidden sibling first and
//! are renamed into place, so a key only becomes readable once its payload is
//! complete.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use super::key::ObjectKey;

pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Open storage at the given root directory, creating it if needed.
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::Init(format!("cannot create data directory {}: {e}", root.display()))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &ObjectKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    fn partial_path(&self, key: &ObjectKey) -> PathBuf {
        self.root.join(format!(".{key}.partial"))
    }

    pub async fn put(&self, key: &ObjectKey, data: &[u8]) -> StorageResult<()> {
        let partial = self.partial_path(key);
        let path = self.object_path(key);

        let result = async {
            fs::write(&partial, data).await?;
            fs::rename(&partial, &path).await
        }
        .await;

        if let Err(source) = result {
            if let Err(e) = fs::remove_file(&partial).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(key = %key, error = %e, "Failed to remove partial object");
                }
            }
            return Err(StorageError::Write {
                key: key.to_string(),
                source,
            });
        }

        debug!(key = %key, bytes = data.len(), "Stored object on disk");
        Ok(())
    }

    pub async fn get(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        match fs::read(self.object_path(key)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }
}
