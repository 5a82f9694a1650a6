use async_trait::async_trait;
use reqwest::Response;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("network error: {status_code} {message}")]
    NetworkError { status_code: u16, message: String },
}

#[async_trait]
pub trait ResponseExt {
    /// Turns any non 2xx response into a [ClientError::NetworkError]
    async fn map_client_error(self) -> Result<Response, ClientError>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }

        Err(ClientError::NetworkError {
            status_code: self.status().as_u16(),
            message: self.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ResponseExt for Result<Response, reqwest::Error> {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        match self {
            Ok(response) => response.map_client_error().await,
            Err(e) => Err(ClientError::Request(e)),
        }
    }
}
