//! S3 backend for post media
//!
//! Uploads go straight to the configured bucket; public URLs are built from
//! [`StorageConfig::object_url`], so the bucket (or the CDN in front of it)
//! must allow public reads of uploaded keys.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::{HubError, Result};
use crate::services::{ObjectHandle, ObjectStore};

/// Object store over an S3 bucket
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    config: StorageConfig,
}

impl S3ObjectStore {
    /// Create a store using AWS configuration from the environment
    pub async fn new(config: StorageConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self {
            client: Client::new(&aws_config),
            config,
        }
    }

    /// Create a store around an existing client
    pub fn with_client(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<ObjectHandle> {
        info!("Uploading {} bytes to s3://{}/{path}", bytes.len(), self.config.bucket);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| HubError::Upload(e.to_string()))?;

        Ok(ObjectHandle {
            path: path.to_string(),
        })
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String> {
        Ok(self.config.object_url(&handle.path))
    }
}
