//! Board state and the categorize pipeline.
//!
//! [`BoardState`] is an owned value: each handler consumes the current state
//! and returns the next one, so submissions and reorders can be tested
//! without a UI.

use shared::{
    domain::{DragEnd, TaskSet},
    extraction::{extract_from_reply, Extraction, ExtractionFailure},
    prompt::build_categorization_prompt,
};
use tracing::{debug, error, info};

use crate::gateway::PromptGateway;

pub const PARSE_FAILED_MESSAGE: &str = "Failed to parse response. Please try again.";
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to prioritize tasks. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorizationOutcome {
    Categorized(TaskSet),
    ParseFailed(ExtractionFailure),
    RequestFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: TaskSet,
    /// User-visible banner text; cleared when a new submission starts.
    pub error: Option<String>,
    /// True while a categorization request is outstanding.
    pub loading: bool,
}

impl BoardState {
    pub fn can_submit(&self, raw_tasks: &str) -> bool {
        !self.loading && !raw_tasks.trim().is_empty()
    }

    pub fn begin_submission(self) -> Self {
        Self {
            error: None,
            loading: true,
            ..self
        }
    }

    /// Replaces the task set with the outcome. Failures leave empty buckets
    /// rather than the previous, stale result.
    pub fn finish_submission(self, outcome: CategorizationOutcome) -> Self {
        let (tasks, error) = match outcome {
            CategorizationOutcome::Categorized(tasks) => (tasks, None),
            CategorizationOutcome::ParseFailed(_) => {
                (TaskSet::default(), Some(PARSE_FAILED_MESSAGE.to_string()))
            }
            CategorizationOutcome::RequestFailed(_) => {
                (TaskSet::default(), Some(REQUEST_FAILED_MESSAGE.to_string()))
            }
        };
        Self {
            tasks,
            error,
            loading: false,
        }
    }

    pub fn reorder(self, event: &DragEnd) -> Self {
        Self {
            tasks: self.tasks.reorder(event),
            ..self
        }
    }

    pub fn dismiss_error(self) -> Self {
        Self {
            error: None,
            ..self
        }
    }
}

/// Builds the prompt for `raw_tasks`, sends it through `gateway` and extracts
/// the task set from the reply. Never fails; failures are outcomes.
pub async fn categorize(gateway: &dyn PromptGateway, raw_tasks: &str) -> CategorizationOutcome {
    let prompt = build_categorization_prompt(raw_tasks);
    let reply = match gateway.generate(&prompt).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(%err, "categorization request failed");
            return CategorizationOutcome::RequestFailed(err.to_string());
        }
    };
    debug!(%reply, "raw gateway reply");

    match extract_from_reply(&reply) {
        Extraction::Extracted(tasks) => {
            info!(
                high = tasks.high_priority.len(),
                medium = tasks.medium_priority.len(),
                low = tasks.low_priority.len(),
                "categorized tasks"
            );
            CategorizationOutcome::Categorized(tasks)
        }
        Extraction::Failed(failure) => {
            error!(
                reason = %failure.reason,
                candidate = %failure.candidate,
                "failed to parse model response"
            );
            CategorizationOutcome::ParseFailed(failure)
        }
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
