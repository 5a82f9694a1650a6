use anyhow::Context;
use tracing::instrument;

/// The copy source header must be url encoded, but the `/` separators have to survive
fn encode_copy_source(bucket: &str, key: &str) -> String {
    let key = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<String>>()
        .join("/");
    format!("{bucket}/{key}")
}

#[instrument(skip(client))]
pub(crate) async fn inner_bucket_copy(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    source_key: &str,
    destination_key: &str,
) -> anyhow::Result<()> {
    client
        .copy_object()
        .bucket(bucket)
        .copy_source(encode_copy_source(bucket, source_key))
        .key(destination_key)
        .send()
        .await
        .context(format!(
            "could not copy {source_key} to {destination_key} in bucket {bucket}"
        ))?;

    Ok(())
}
