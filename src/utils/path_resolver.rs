//! Path confinement for untrusted request paths
//!
//! Request suffixes are checked lexically before they ever touch the
//! filesystem, then joined onto a fixed root. Checking after normalization
//! would let `a/../../x` style inputs slip through, so the raw segment is
//! what gets inspected.

use std::path::{Path, PathBuf};

use tokio::fs;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("path is not allowed: {0}")]
    Forbidden(String),

    #[error("file not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `requested` to an existing file under the root.
    pub async fn resolve(&self, requested: &str) -> Result<PathBuf, ResolveError> {
        if requested.is_empty() {
            return Err(ResolveError::NotFound(String::new()));
        }
        if is_unsafe(requested) {
            return Err(ResolveError::Forbidden(requested.to_string()));
        }

        let path = self.root.join(requested);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(ResolveError::NotFound(requested.to_string())),
        }
    }
}

fn is_unsafe(requested: &str) -> bool {
    requested.contains("..")
        || requested.starts_with('/')
        || requested.starts_with('\\')
        || requested.contains('\0')
        || Path::new(requested).is_absolute()
}
