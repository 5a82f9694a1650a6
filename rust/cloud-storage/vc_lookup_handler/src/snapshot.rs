use lambda_runtime::tracing;
use s3_client::ObjectStore;

use crate::models::VcNumber;

/// Reads the snapshot file as text.
/// A snapshot that cannot be read counts as empty, so every vc number is reported absent.
#[tracing::instrument(skip(s3_client))]
pub async fn read_snapshot(s3_client: &dyn ObjectStore, bucket: &str, key: &str) -> String {
    let bytes = match s3_client.get(bucket, key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error=?e, "error reading snapshot from s3");
            return String::new();
        }
    };

    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!(error=?e, "snapshot is not valid utf-8");
            String::new()
        }
    }
}

/// Whether any line of the snapshot contains the vc number
pub fn contains(snapshot: &str, vc_number: &VcNumber) -> bool {
    match snapshot
        .lines()
        .position(|line| line.contains(vc_number.as_ref()))
    {
        Some(line) => {
            tracing::info!(line, vc_number=%vc_number, "vc number is present");
            true
        }
        None => {
            tracing::info!(vc_number=%vc_number, "vc number is not present in the snapshot");
            false
        }
    }
}
