use std::fmt::Display;

use chrono::NaiveDateTime;

/// Fixed header of every refresh command
const COMMAND_PREFIX: &str = "0003M00410001010100";
/// Fixed field placed between the timestamp and the subscriber id
const COMMAND_FIELD: &str = "0001SIN";
/// Action code requesting a refresh
const REFRESH_ACTION: &str = "V";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// A fixed layout command understood by the refresh service.
///
/// Layout: `prefix | YYYYMMDDHHMMSS | field | subscriber id | action`, no separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPacket(String);

impl CommandPacket {
    /// Builds the refresh command for `subscriber_id` stamped with `now`.
    #[tracing::instrument(level = tracing::Level::DEBUG)]
    pub fn refresh(subscriber_id: &str, now: NaiveDateTime) -> Self {
        let command = format!(
            "{COMMAND_PREFIX}{}{COMMAND_FIELD}{subscriber_id}{REFRESH_ACTION}",
            now.format(TIMESTAMP_FORMAT)
        );
        let packet = Self(command.trim().to_string());
        tracing::info!(packet=%packet, "refresh command made");
        packet
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CommandPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
