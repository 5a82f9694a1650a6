use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use lambda_runtime::tracing;
use s3_client::ObjectStore;
use tempfile::TempDir;

use crate::{
    models::{BatchObject, IngestMode},
    service::extract,
};

const SCRATCH_FILE_NAME: &str = "batch.csv";

/// A batch file fetched for processing
#[derive(Debug)]
pub enum StagedBatch {
    /// Downloaded into a temporary directory which is removed on drop
    Scratch { _dir: TempDir, path: PathBuf },
    /// Read fully into memory
    InMemory(Vec<u8>),
}

/// Fetches the batch object according to `mode`
#[tracing::instrument(skip(s3_client))]
pub async fn stage(
    s3_client: &dyn ObjectStore,
    mode: IngestMode,
    object: &BatchObject,
) -> anyhow::Result<StagedBatch> {
    match mode {
        IngestMode::Scratch => {
            let dir = tempfile::tempdir().context("unable to create scratch directory")?;
            let path = dir.path().join(SCRATCH_FILE_NAME);

            tracing::debug!(path=?path, "downloading batch to scratch");
            s3_client
                .download_to_file(&object.bucket, &object.key, &path)
                .await
                .inspect_err(|e| tracing::error!(error=?e, "error downloading s3 file"))?;

            Ok(StagedBatch::Scratch { _dir: dir, path })
        }
        IngestMode::InMemory => {
            let content = s3_client
                .get(&object.bucket, &object.key)
                .await
                .inspect_err(|e| tracing::error!(error=?e, "error downloading s3 file"))?;

            Ok(StagedBatch::InMemory(content))
        }
    }
}

impl StagedBatch {
    /// Extracts today's subscriber ids. A batch that cannot be read yields no ids.
    pub fn subscriber_ids(&self, today: NaiveDate) -> Vec<String> {
        tracing::info!("extracting subscriber ids");

        let result = match self {
            StagedBatch::Scratch { path, .. } => std::fs::File::open(path)
                .map_err(csv::Error::from)
                .and_then(|file| extract::subscriber_ids(file, today)),
            StagedBatch::InMemory(content) => extract::subscriber_ids(content.as_slice(), today),
        };

        match result {
            Ok(subscriber_ids) => subscriber_ids,
            Err(e) => {
                tracing::error!(error=?e, "error reading or processing the batch file");
                Vec::new()
            }
        }
    }
}

/// Moves the batch under the processed prefix and returns the processed key.
///
/// Scratch batches are re-uploaded from the local copy and the original object stays.
/// In memory batches are copied inside the bucket and the original object is deleted.
#[tracing::instrument(skip(s3_client, staged))]
pub async fn relocate(
    s3_client: &dyn ObjectStore,
    staged: &StagedBatch,
    object: &BatchObject,
) -> anyhow::Result<String> {
    let processed_key = object.processed_key();

    match staged {
        StagedBatch::Scratch { path, .. } => {
            s3_client
                .upload_file(&object.bucket, &processed_key, path)
                .await
                .inspect_err(|e| tracing::error!(error=?e, "error uploading processed file"))?;
            tracing::info!(processed_key=%processed_key, "processed file uploaded");
        }
        StagedBatch::InMemory(_) => {
            s3_client
                .inner_bucket_copy(&object.bucket, &object.key, &processed_key)
                .await
                .inspect_err(|e| tracing::error!(error=?e, "error copying file in s3"))?;
            tracing::info!(processed_key=%processed_key, "file copied");

            s3_client
                .delete(&object.bucket, &object.key)
                .await
                .inspect_err(|e| tracing::error!(error=?e, "error deleting original file in s3"))?;
            tracing::info!(key=%object.key, "original file deleted");
        }
    }

    Ok(processed_key)
}

#[cfg(test)]
mod tests {
    use s3_client::MockObjectStore;

    use super::*;

    const BATCH: &str = "20261016A,x\n20261015B,y\n";

    fn object() -> BatchObject {
        BatchObject {
            bucket: "batches".to_string(),
            key: "daily.csv".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[tokio::test]
    async fn scratch_mode_downloads_to_a_local_file() {
        let mut s3 = MockObjectStore::new();
        s3.expect_download_to_file()
            .withf(|bucket, key, _| bucket == "batches" && key == "daily.csv")
            .times(1)
            .returning(|_, _, path| {
                std::fs::write(path, BATCH)?;
                Ok(())
            });
        s3.expect_get().never();

        let staged = stage(&s3, IngestMode::Scratch, &object()).await.unwrap();

        let StagedBatch::Scratch { path, .. } = &staged else {
            panic!("expected a scratch batch, got {staged:?}");
        };
        assert!(path.exists());
        assert_eq!(staged.subscriber_ids(today()), vec!["20261016A"]);
    }

    #[tokio::test]
    async fn scratch_directory_is_removed_on_drop() {
        let mut s3 = MockObjectStore::new();
        s3.expect_download_to_file().returning(|_, _, path| {
            std::fs::write(path, BATCH)?;
            Ok(())
        });

        let staged = stage(&s3, IngestMode::Scratch, &object()).await.unwrap();
        let StagedBatch::Scratch { path, .. } = &staged else {
            panic!("expected a scratch batch");
        };
        let path = path.clone();
        drop(staged);

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn in_memory_mode_reads_the_object() {
        let mut s3 = MockObjectStore::new();
        s3.expect_get()
            .times(1)
            .returning(|_, _| Ok(BATCH.as_bytes().to_vec()));
        s3.expect_download_to_file().never();

        let staged = stage(&s3, IngestMode::InMemory, &object()).await.unwrap();

        assert_eq!(staged.subscriber_ids(today()), vec!["20261016A"]);
    }

    #[tokio::test]
    async fn fetch_failures_propagate() {
        let mut s3 = MockObjectStore::new();
        s3.expect_get()
            .returning(|_, _| Err(anyhow::anyhow!("AccessDenied")));

        assert!(stage(&s3, IngestMode::InMemory, &object()).await.is_err());
    }

    #[tokio::test]
    async fn scratch_download_failures_propagate() {
        let mut s3 = MockObjectStore::new();
        s3.expect_download_to_file()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("NoSuchKey")));

        assert!(stage(&s3, IngestMode::Scratch, &object()).await.is_err());
    }

    #[test]
    fn unreadable_batches_yield_no_ids() {
        let missing = StagedBatch::Scratch {
            _dir: tempfile::tempdir().unwrap(),
            path: PathBuf::from("/nonexistent/batch.csv"),
        };
        let binary = StagedBatch::InMemory(vec![0x32, 0xff, 0xfe, b'\n']);

        assert!(missing.subscriber_ids(today()).is_empty());
        assert!(binary.subscriber_ids(today()).is_empty());
    }

    #[tokio::test]
    async fn in_memory_relocation_copies_then_deletes() {
        let mut s3 = MockObjectStore::new();
        let mut seq = mockall::Sequence::new();
        s3.expect_inner_bucket_copy()
            .withf(|bucket, source, destination| {
                bucket == "batches" && source == "daily.csv" && destination == "processed/daily.csv"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        s3.expect_delete()
            .withf(|bucket, key| bucket == "batches" && key == "daily.csv")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let staged = StagedBatch::InMemory(BATCH.as_bytes().to_vec());
        let processed_key = relocate(&s3, &staged, &object()).await.unwrap();

        assert_eq!(processed_key, "processed/daily.csv");
    }

    #[tokio::test]
    async fn failed_copies_do_not_delete_the_original() {
        let mut s3 = MockObjectStore::new();
        s3.expect_inner_bucket_copy()
            .returning(|_, _, _| Err(anyhow::anyhow!("SlowDown")));
        s3.expect_delete().never();

        let staged = StagedBatch::InMemory(Vec::new());

        assert!(relocate(&s3, &staged, &object()).await.is_err());
    }

    #[tokio::test]
    async fn scratch_relocation_uploads_the_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCRATCH_FILE_NAME);
        std::fs::write(&path, BATCH).unwrap();
        let expected_path = path.clone();

        let mut s3 = MockObjectStore::new();
        s3.expect_upload_file()
            .withf(move |bucket, key, path| {
                bucket == "batches" && key == "processed/daily.csv" && path == expected_path
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        s3.expect_inner_bucket_copy().never();
        s3.expect_delete().never();

        let staged = StagedBatch::Scratch { _dir: dir, path };
        let processed_key = relocate(&s3, &staged, &object()).await.unwrap();

        assert_eq!(processed_key, "processed/daily.csv");
    }

    #[tokio::test]
    async fn scratch_upload_failures_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCRATCH_FILE_NAME);
        std::fs::write(&path, BATCH).unwrap();

        let mut s3 = MockObjectStore::new();
        s3.expect_upload_file()
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("AccessDenied")));
        s3.expect_delete().never();

        let staged = StagedBatch::Scratch { _dir: dir, path };

        assert!(relocate(&s3, &staged, &object()).await.is_err());
    }
}
