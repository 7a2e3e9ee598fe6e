use async_trait::async_trait;
use thiserror::Error;

mod gemini;

pub use gemini::{GeminiBackend, GeminiConfig, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend credential is not configured")]
    MissingCredential,
    #[error("http error: {0}")]
    Http(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend error: {0}")]
    Backend(String),
    #[error("response error: {0}")]
    Response(String),
}

/// A generative-content service that turns one prompt into one completion.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
    fn model(&self) -> &str;
}
