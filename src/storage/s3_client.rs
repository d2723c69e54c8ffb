//! S3-compatible storage backend (AWS S3, Minio, Backblaze, etc.)
//!
//! Objects are uploaded under their key as the object name. Clients fetch
//! them directly from the object store, either through the public object URL
//! or through a presigned GET URL.

use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::error::{StorageError, StorageResult};
use super::key::ObjectKey;
use crate::config::S3Config;

pub struct S3Storage {
    bucket: Bucket,
    public_urls: bool,
    presign_expiry_secs: u32,
}

impl S3Storage {
    /// Build a bucket handle from configuration.
    ///
    /// No request is made to the object store here.
    pub fn new(config: &S3Config) -> StorageResult<Self> {
        if config.bucket.is_empty() {
            return Err(StorageError::Init("no target bucket configured".to_string()));
        }

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Init(format!("invalid region {}: {e}", config.region)))?,
        };

        let credentials = match (&config.access_key_id, &config.secret_access_key) {
            (Some(access), Some(secret)) => {
                Credentials::new(Some(access.as_str()), Some(secret.as_str()), None, None, None)
            }
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Init(format!("cannot load object store credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        info!(
            bucket = %config.bucket,
            region = %config.region,
            public_urls = config.public_urls,
            "Configured object store backend"
        );

        Ok(Self {
            bucket,
            public_urls: config.public_urls,
            presign_expiry_secs: config.presign_expiry_secs,
        })
    }

    pub async fn put(&self, key: &ObjectKey, data: &[u8]) -> StorageResult<()> {
        let response = self.bucket.put_object(key.as_str(), data).await?;
        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(StorageError::RemoteStatus {
                operation: "put",
                key: key.to_string(),
                status,
            });
        }
        debug!(key = %key, bytes = data.len(), "Uploaded object");
        Ok(())
    }

    /// Fetch an object through the gateway. Handlers redirect instead.
    pub async fn get(&self, key: &ObjectKey) -> StorageResult<Vec<u8>> {
        let response = match self.bucket.get_object(key.as_str()).await {
            Ok(response) => response,
            Err(S3Error::HttpFailWithBody(404, _)) => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        match response.status_code() {
            200..=299 => Ok(response.bytes().to_vec()),
            404 => Err(StorageError::NotFound(key.to_string())),
            status => Err(StorageError::RemoteStatus {
                operation: "get",
                key: key.to_string(),
                status,
            }),
        }
    }

    /// URL a client can fetch the object from directly.
    pub async fn url(&self, key: &ObjectKey) -> StorageResult<String> {
        if self.public_urls {
            return Ok(format!("{}/{}", self.bucket.url(), key));
        }
        let url = self
            .bucket
            .presign_get(key.as_str(), self.presign_expiry_secs, None)
            .await?;
        Ok(url)
    }
}
