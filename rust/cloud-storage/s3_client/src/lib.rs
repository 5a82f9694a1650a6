use std::path::Path;

use async_trait::async_trait;

mod copy;
mod delete;
mod get;
mod put;

/// The object storage operations the lambdas rely on.
///
/// Implemented by [S3] for the deployed functions. Enable the `mock` feature to get
/// `MockObjectStore` for tests.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Retrieves the full content of the provided key.
    async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Streams the provided key into a file at `path`.
    async fn download_to_file(&self, bucket: &str, key: &str, path: &Path) -> anyhow::Result<()>;

    /// Uploads the file at `path` into the bucket at the provided key.
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> anyhow::Result<()>;

    /// Copies an object to another key in the same bucket.
    async fn inner_bucket_copy(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> anyhow::Result<()>;

    /// Deletes the provided key from the bucket.
    async fn delete(&self, bucket: &str, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ObjectStore for S3 {
    #[tracing::instrument(skip(self))]
    async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
        get::get(&self.inner, bucket, key).await
    }

    #[tracing::instrument(skip(self))]
    async fn download_to_file(&self, bucket: &str, key: &str, path: &Path) -> anyhow::Result<()> {
        get::download_to_file(&self.inner, bucket, key, path).await
    }

    #[tracing::instrument(skip(self))]
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> anyhow::Result<()> {
        put::upload_file(&self.inner, bucket, key, path).await
    }

    #[tracing::instrument(skip(self))]
    async fn inner_bucket_copy(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> anyhow::Result<()> {
        copy::inner_bucket_copy(&self.inner, bucket, source_key, destination_key).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, bucket: &str, key: &str) -> anyhow::Result<()> {
        delete::delete(&self.inner, bucket, key).await
    }
}
