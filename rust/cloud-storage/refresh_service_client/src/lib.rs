//! Client side of the downstream refresh service.
//!
//! A refresh is requested by sending a [CommandPacket] for a subscriber. The
//! [RefreshDispatcher] capability has two implementations: [RefreshServiceClient]
//! which issues the real http request and [StubRefreshClient] which only logs.
use async_trait::async_trait;

mod client;
mod error;
mod packet;
mod stub;

pub use client::RefreshServiceClient;
pub use error::{ClientError, ResponseExt};
pub use packet::CommandPacket;
pub use stub::StubRefreshClient;

/// Sends command packets to the refresh service.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RefreshDispatcher: Send + Sync {
    /// Sends a single packet. Implementations report remote failures inside the
    /// returned [RefreshResponse]; an `Err` means the dispatch itself could not run.
    async fn send(&self, packet: &CommandPacket) -> anyhow::Result<RefreshResponse>;
}

/// The outcome of sending one command packet.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// 200 when the refresh service accepted the packet, 500 otherwise
    pub status_code: u16,
    /// The packet that was sent
    pub request: String,
    /// The json body returned by the service, or the error text on failure
    pub response: serde_json::Value,
}

impl RefreshResponse {
    pub const SUCCESS: u16 = 200;
    pub const FAILURE: u16 = 500;

    pub fn success(packet: &CommandPacket, response: serde_json::Value) -> Self {
        Self {
            status_code: Self::SUCCESS,
            request: packet.to_string(),
            response,
        }
    }

    pub fn failure(packet: &CommandPacket, error: impl ToString) -> Self {
        Self {
            status_code: Self::FAILURE,
            request: packet.to_string(),
            response: serde_json::Value::String(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Self::SUCCESS
    }
}
