//! Object storage access for generated PDFs.
//!
//! Only two things are ever asked of the store: whether an object whose name
//! starts with a search term exists yet, and the public URL it is served from.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;
use tracing::debug;

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 error: {0}")]
    S3(String),
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Existence check: does at least one object name start with `search`?
    /// The match is a case-sensitive prefix, not a substring search.
    async fn exists(&self, search: &str) -> Result<bool, StorageError>;

    /// Public download URL for the object called `name`.
    fn public_url(&self, name: &str) -> String;
}

/// S3-compatible bucket (Supabase storage, MinIO, AWS).
#[derive(Clone)]
pub struct S3ArtifactStore {
    client: S3Client,
    bucket: String,
    public_base: String,
}

impl S3ArtifactStore {
    pub fn new(client: S3Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base,
        }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn exists(&self, search: &str) -> Result<bool, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(search)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| StorageError::S3(DisplayErrorContext(&e).to_string()))?;

        let found = !output.contents().is_empty();
        debug!(bucket = %self.bucket, search, found, "Existence check");
        Ok(found)
    }

    fn public_url(&self, name: &str) -> String {
        public_url(&self.public_base, &self.bucket, name)
    }
}

/// `<base>/<bucket>/<name>`, with the name inserted as-is.
pub fn public_url(base: &str, bucket: &str, name: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), bucket, name)
}

/// Constructs an S3 client for the configured endpoint. Path-style addressing
/// is forced since Supabase and MinIO do not serve virtual-hosted buckets.
pub async fn build_s3_client(config: &ClientConfig) -> S3Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "resume-forge-static",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    S3Client::from_conf(s3_config)
}
