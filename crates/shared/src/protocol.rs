use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const GET_TASKS_ROUTE: &str = "/api/gettasks";

/// Fixed message returned for every backend failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate content";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Failure envelope; never carries a `text` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ApiError> for ErrorResponse {
    fn from(value: ApiError) -> Self {
        Self {
            error: value.message,
        }
    }
}
