use std::sync::Arc;

use genai_integration::{BackendError, GenerativeBackend};
use shared::{error::ApiError, protocol::GENERATION_FAILED_MESSAGE};
use tracing::{error, info};

pub const EMPTY_PROMPT_MESSAGE: &str = "prompt must not be empty";

#[derive(Clone)]
pub struct ApiContext {
    pub backend: Arc<dyn GenerativeBackend>,
}

impl ApiContext {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }
}

/// Forwards `prompt` verbatim to the backend and returns the completion text.
///
/// One attempt, no retry. Backend detail is logged and replaced by a fixed
/// message in the returned error.
pub async fn generate_text(ctx: &ApiContext, prompt: &str) -> Result<String, ApiError> {
    if prompt.trim().is_empty() {
        return Err(ApiError::validation(EMPTY_PROMPT_MESSAGE));
    }

    let model = ctx.backend.model();
    match ctx.backend.generate(prompt).await {
        Ok(text) => {
            info!(model, %text, "generated content");
            Ok(text)
        }
        Err(err) => {
            log_backend_failure(model, &err);
            Err(ApiError::internal(GENERATION_FAILED_MESSAGE))
        }
    }
}

fn log_backend_failure(model: &str, err: &BackendError) {
    match err {
        BackendError::MissingCredential => {
            error!(model, "generative backend credential missing; set GEMINI_API_KEY")
        }
        other => error!(model, error = %other, "generative backend call failed"),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
