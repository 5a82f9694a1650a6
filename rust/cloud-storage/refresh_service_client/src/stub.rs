use async_trait::async_trait;

use crate::{CommandPacket, RefreshDispatcher, RefreshResponse};

/// Dispatcher used while no refresh service endpoint is configured.
///
/// Makes no network call and always reports an accepted packet with a null body.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRefreshClient;

#[async_trait]
impl RefreshDispatcher for StubRefreshClient {
    #[tracing::instrument(skip(self, packet), fields(packet=%packet))]
    async fn send(&self, packet: &CommandPacket) -> anyhow::Result<RefreshResponse> {
        tracing::info!("no refresh service configured, skipping dispatch");
        Ok(RefreshResponse::success(packet, serde_json::Value::Null))
    }
}
