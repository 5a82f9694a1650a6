use std::path::Path;

use anyhow::Context;
use aws_sdk_s3::primitives::ByteStream;

#[tracing::instrument(skip(client))]
pub(crate) async fn upload_file(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let body = ByteStream::from_path(path)
        .await
        .context(format!("could not read file {}", path.display()))?;
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(body)
        .send()
        .await
        .context(format!("could not upload item {key} into bucket {bucket}"))?;
    Ok(())
}
