use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{ErrorResponse, GenerateRequest, GET_TASKS_ROUTE};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum GatewayClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },
}

/// The prompt endpoint as seen by the board.
#[async_trait]
pub trait PromptGateway: Send + Sync {
    /// Sends one prompt and returns the decoded success body.
    async fn generate(&self, prompt: &str) -> Result<Value, GatewayClientError>;
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    endpoint: Url,
}

impl GatewayClient {
    pub fn new(server_url: &str) -> Result<Self, GatewayClientError> {
        let invalid = |source| GatewayClientError::InvalidUrl {
            url: server_url.to_string(),
            source,
        };
        let endpoint = Url::parse(server_url)
            .and_then(|base| base.join(GET_TASKS_ROUTE))
            .map_err(invalid)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PromptGateway for GatewayClient {
    async fn generate(&self, prompt: &str) -> Result<Value, GatewayClientError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(GatewayClientError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(res.json().await?)
    }
}
