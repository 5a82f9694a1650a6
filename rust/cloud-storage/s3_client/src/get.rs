use std::path::Path;

use anyhow::Context;
use aws_sdk_s3 as s3;

/// Gets a given item from the bucket
#[tracing::instrument(skip(client))]
pub(crate) async fn get(client: &s3::Client, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not get item {key} from bucket {bucket}"))?;

    let body = resp
        .body
        .collect()
        .await
        .context("could not collect body")?;
    Ok(body.into_bytes().to_vec())
}

/// Streams a given item from the bucket into a local file, creating or truncating it
#[tracing::instrument(skip(client))]
pub(crate) async fn download_to_file(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let obj = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .context(format!("could not get item {key} from bucket {bucket}"))?;

    let mut body = obj.body.into_async_read();
    let mut file = tokio::fs::File::create(path)
        .await
        .context(format!("could not create file {}", path.display()))?;

    let written = tokio::io::copy(&mut body, &mut file)
        .await
        .context("could not write body to file")?;

    tracing::trace!(bytes = written, "downloaded object");

    Ok(())
}
