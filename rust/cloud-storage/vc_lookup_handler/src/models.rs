use std::fmt::Display;

use chrono::NaiveDate;

/// Length of a normalized vc number
pub const VC_NUMBER_LENGTH: usize = 11;
/// Some callers send a trailing check character which is dropped
const VC_NUMBER_LENGTH_WITH_CHECK: usize = 12;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid VC number format")]
    InvalidFormat { length: usize },
}

/// The lookup invocation payload
#[derive(serde::Deserialize, Debug, Default)]
pub struct LookupRequest {
    #[serde(rename = "vcNum", default)]
    pub vc_num: String,
}

/// A vc number normalized to [VC_NUMBER_LENGTH] characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcNumber(String);

impl TryFrom<&str> for VcNumber {
    type Error = LookupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let length = value.chars().count();
        match length {
            VC_NUMBER_LENGTH => Ok(Self(value.to_string())),
            VC_NUMBER_LENGTH_WITH_CHECK => {
                Ok(Self(value.chars().take(VC_NUMBER_LENGTH).collect()))
            }
            length => Err(LookupError::InvalidFormat { length }),
        }
    }
}

impl AsRef<str> for VcNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for VcNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the snapshot file published for `date`
pub fn snapshot_key(date: NaiveDate) -> String {
    format!("VCNUM/DAILY_AMSRECORDS_{}.csv", date.format("%Y%m%d"))
}

#[derive(
    serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display,
)]
pub enum StatusMessage {
    Successful,
    Failed,
}

/// Body of a completed lookup. `status` carries presence, the transport status is always 200.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LookupStatus {
    pub status: bool,
    pub status_message: StatusMessage,
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl LookupStatus {
    pub fn new(present: bool) -> Self {
        Self {
            status: present,
            status_message: if present {
                StatusMessage::Successful
            } else {
                StatusMessage::Failed
            },
            details: serde_json::Map::new(),
        }
    }
}

/// The proxy style response returned to the invoker
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    pub status_code: u16,
    /// json encoded payload
    pub body: String,
}

impl LambdaResponse {
    pub fn json<T: serde::Serialize>(status_code: u16, body: &T) -> serde_json::Result<Self> {
        Ok(Self {
            status_code,
            body: serde_json::to_string(body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_accepts_eleven_characters() {
        let vc = VcNumber::try_from("12345678901").unwrap();
        assert_eq!(vc.as_ref(), "12345678901");
    }

    #[test]
    fn it_truncates_twelve_characters() {
        assert_eq!(
            VcNumber::try_from("123456789012"),
            VcNumber::try_from("12345678901")
        );
    }

    #[test]
    fn it_rejects_other_lengths() {
        for raw in ["", "123", "1234567890", "1234567890123"] {
            assert_eq!(
                VcNumber::try_from(raw),
                Err(LookupError::InvalidFormat {
                    length: raw.len()
                })
            );
        }
    }

    #[test]
    fn length_is_counted_in_characters() {
        let vc = VcNumber::try_from("ÄBCDEFGHIJKL").unwrap();
        assert_eq!(vc.as_ref(), "ÄBCDEFGHIJK");
    }

    #[test]
    fn snapshot_key_uses_the_compact_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(snapshot_key(date), "VCNUM/DAILY_AMSRECORDS_20260105.csv");
    }

    #[test]
    fn status_serializes_in_camel_case() {
        let body = serde_json::to_value(LookupStatus::new(true)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "status": true, "statusMessage": "Successful", "details": {} })
        );
    }

    #[test]
    fn status_message_displays_its_name() {
        assert_eq!(StatusMessage::Successful.to_string(), "Successful");
        assert_eq!(StatusMessage::Failed.to_string(), "Failed");
    }

    #[test]
    fn missing_vc_num_defaults_to_empty() {
        let request: LookupRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(request.vc_num, "");
    }
}
