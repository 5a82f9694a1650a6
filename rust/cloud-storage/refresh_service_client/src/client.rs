use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::{ClientError, CommandPacket, RefreshDispatcher, RefreshResponse, ResponseExt};

/// Query parameter carrying the command packet
const PACKET_PARAM: &str = "packet";

/// Http client for the refresh service endpoint.
#[derive(Clone, Debug)]
pub struct RefreshServiceClient {
    url: String,
    client: reqwest::Client,
}

impl RefreshServiceClient {
    /// `timeout` bounds each request. With `None` the request waits as long as the
    /// service keeps the connection open.
    pub fn new(url: String, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("unable to build refresh service http client")?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, packet: &CommandPacket) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[(PACKET_PARAM, packet.as_str())])
            .send()
            .await
            .map_client_error()
            .await?;

        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[async_trait]
impl RefreshDispatcher for RefreshServiceClient {
    #[tracing::instrument(skip(self, packet), fields(packet=%packet, url=%self.url))]
    async fn send(&self, packet: &CommandPacket) -> anyhow::Result<RefreshResponse> {
        match self.request(packet).await {
            Ok(body) => {
                tracing::info!(response=%body, "response from refresh service");
                Ok(RefreshResponse::success(packet, body))
            }
            Err(e) => {
                tracing::error!(error=?e, "error making request to refresh service");
                Ok(RefreshResponse::failure(packet, e))
            }
        }
    }
}
