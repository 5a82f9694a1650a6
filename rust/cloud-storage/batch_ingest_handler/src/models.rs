use anyhow::Context;
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::tracing;
use refresh_service_client::RefreshResponse;

/// Prefix processed batch files are moved under
pub const PROCESSED_PREFIX: &str = "processed/";

/// How a batch file is staged while it is processed, which also decides how it is relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum IngestMode {
    /// Download to local scratch space, re-upload the scratch copy under [PROCESSED_PREFIX].
    /// The original object is left in place.
    Scratch,
    /// Read into memory, copy under [PROCESSED_PREFIX] and delete the original object.
    #[default]
    InMemory,
}

/// The uploaded batch file an invocation works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchObject {
    pub bucket: String,
    pub key: String,
}

impl BatchObject {
    /// Reads the bucket and key out of the first record of the notification.
    /// S3 url encodes keys in notifications, the returned key is decoded.
    pub fn from_event(event: &S3Event) -> anyhow::Result<Self> {
        let record = event
            .records
            .first()
            .context("s3 event did not contain any records")?;

        if event.records.len() > 1 {
            tracing::warn!(
                record_count = event.records.len(),
                "only the first record of the event is processed"
            );
        }

        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .context("s3 record is missing the bucket name")?;
        let raw_key = record
            .s3
            .object
            .key
            .clone()
            .context("s3 record is missing the object key")?;

        let key = urlencoding::decode(&raw_key.replace('+', " "))
            .context("unable to decode object key")?
            .into_owned();

        Ok(Self { bucket, key })
    }

    /// Whether this object was already moved under [PROCESSED_PREFIX]
    pub fn is_processed(&self) -> bool {
        self.key.starts_with(PROCESSED_PREFIX)
    }

    pub fn processed_key(&self) -> String {
        format!("{PROCESSED_PREFIX}{}", self.key)
    }
}

/// The response returned to the invoker
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub status_code: u16,
    pub body: String,
}

impl IngestResponse {
    pub fn processed(processed_key: &str, bucket: &str) -> Self {
        Self {
            status_code: 200,
            body: format!("Processed file {processed_key} uploaded to bucket {bucket}"),
        }
    }

    pub fn skipped(object: &BatchObject) -> Self {
        Self {
            status_code: 200,
            body: format!(
                "Skipped file {} in bucket {}, it is already processed",
                object.key, object.bucket
            ),
        }
    }
}

#[derive(
    serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display,
)]
pub enum StatusMessage {
    Successful,
    Failed,
}

/// The logged outcome of refreshing one subscriber
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub details: RefreshResponse,
    pub status: bool,
    pub status_message: StatusMessage,
}

impl From<RefreshResponse> for DispatchResult {
    fn from(details: RefreshResponse) -> Self {
        let status = details.is_success();
        Self {
            details,
            status,
            status_message: if status {
                StatusMessage::Successful
            } else {
                StatusMessage::Failed
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn s3_event(bucket: &str, key: &str) -> S3Event {
        serde_json::from_value(json!({
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "awsRegion": "us-east-1",
                    "eventTime": "2026-10-16T06:00:00.000Z",
                    "eventName": "ObjectCreated:Put",
                    "userIdentity": { "principalId": "EXAMPLE" },
                    "requestParameters": { "sourceIPAddress": "127.0.0.1" },
                    "responseElements": {
                        "x-amz-request-id": "EXAMPLE123456789",
                        "x-amz-id-2": "EXAMPLE123/5678abcdefghijklambdaisawesome/mnopqrstuvwxyzABCDEFGH"
                    },
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "configurationId": "daily-batch-upload",
                        "bucket": {
                            "name": bucket,
                            "ownerIdentity": { "principalId": "EXAMPLE" },
                            "arn": format!("arn:aws:s3:::{bucket}")
                        },
                        "object": {
                            "key": key,
                            "size": 1024,
                            "eTag": "0123456789abcdef0123456789abcdef",
                            "sequencer": "0A1B2C3D4E5F678901"
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn it_reads_the_first_record() {
        let object = BatchObject::from_event(&s3_event("batches", "daily.csv")).unwrap();
        assert_eq!(
            object,
            BatchObject {
                bucket: "batches".to_string(),
                key: "daily.csv".to_string()
            }
        );
    }

    #[test]
    fn it_decodes_notification_keys() {
        let object =
            BatchObject::from_event(&s3_event("batches", "incoming/daily+batch%3D1.csv")).unwrap();
        assert_eq!(object.key, "incoming/daily batch=1.csv");
        assert_eq!(object.processed_key(), "processed/incoming/daily batch=1.csv");
    }

    #[test]
    fn empty_events_are_rejected() {
        let event: S3Event = serde_json::from_value(json!({ "Records": [] })).unwrap();
        assert!(BatchObject::from_event(&event).is_err());
    }

    #[test]
    fn processed_keys_are_detected() {
        let object = BatchObject {
            bucket: "batches".to_string(),
            key: "processed/daily.csv".to_string(),
        };
        assert!(object.is_processed());
    }

    #[test]
    fn ingest_mode_parses_from_config_values() {
        assert_eq!("scratch".parse::<IngestMode>().unwrap(), IngestMode::Scratch);
        assert_eq!("in_memory".parse::<IngestMode>().unwrap(), IngestMode::InMemory);
        assert!("memory".parse::<IngestMode>().is_err());
        assert_eq!(IngestMode::default().to_string(), "in_memory");
    }

    #[test]
    fn dispatch_status_follows_the_refresh_outcome() {
        let accepted = RefreshResponse {
            status_code: 200,
            request: "packet".to_string(),
            response: json!({}),
        };
        let rejected = RefreshResponse {
            status_code: 500,
            request: "packet".to_string(),
            response: json!("timed out"),
        };

        let accepted = DispatchResult::from(accepted);
        let rejected = DispatchResult::from(rejected);

        assert!(accepted.status);
        assert_eq!(accepted.status_message, StatusMessage::Successful);
        assert!(!rejected.status);
        assert_eq!(rejected.status_message.to_string(), "Failed");
        assert_eq!(
            serde_json::to_value(&rejected).unwrap()["statusMessage"],
            json!("Failed")
        );
    }
}
