//! Recovery of a [`TaskSet`] from untrusted model output.
//!
//! The model is asked for a JSON array of single-key objects but nothing
//! enforces it. Extraction looks for a ```` ```json ```` fence first and falls
//! back to the whole reply, then applies the shape policy:
//!
//! * an array is scanned element by element, an object is read directly; a
//!   recognized key overwrites its bucket and the last occurrence wins;
//! * any other JSON shape yields an empty set without error;
//! * a bucket value that is an array keeps its string elements, renders
//!   numbers and booleans as text and drops everything else; a non-empty
//!   string becomes a one-label bucket; any other value is ignored.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Priority, TaskSet};

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("response is not valid JSON: {reason}")]
pub struct ExtractionFailure {
    pub reason: String,
    /// The text that failed to parse.
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Extracted(TaskSet),
    Failed(ExtractionFailure),
}

impl Extraction {
    pub fn is_failed(&self) -> bool {
        matches!(self, Extraction::Failed(_))
    }

    /// The recovered set, or empty buckets when extraction failed.
    pub fn into_task_set(self) -> TaskSet {
        match self {
            Extraction::Extracted(tasks) => tasks,
            Extraction::Failed(_) => TaskSet::default(),
        }
    }
}

/// Extracts from a gateway reply body. A reply without a string `text`
/// field yields an empty set.
pub fn extract_from_reply(reply: &Value) -> Extraction {
    match reply.get("text").and_then(Value::as_str) {
        Some(text) => extract_task_set(text),
        None => {
            debug!("gateway reply carries no text field");
            Extraction::Extracted(TaskSet::default())
        }
    }
}

pub fn extract_task_set(text: &str) -> Extraction {
    let candidate = json_candidate(text);
    debug!(candidate, "extracted json candidate");

    let parsed: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(err) => {
            return Extraction::Failed(ExtractionFailure {
                reason: err.to_string(),
                candidate: candidate.to_string(),
            })
        }
    };

    let mut tasks = TaskSet::default();
    match &parsed {
        Value::Array(items) => {
            for object in items.iter().filter_map(Value::as_object) {
                apply_buckets(&mut tasks, object);
            }
        }
        Value::Object(object) => apply_buckets(&mut tasks, object),
        _ => debug!("parsed response has no recognizable shape"),
    }
    Extraction::Extracted(tasks)
}

/// Interior of the first ```` ```json ```` fence (case-insensitive), trimmed;
/// otherwise the whole text, trimmed.
pub fn json_candidate(text: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    if let Some(open) = lower.find(FENCE_OPEN) {
        let start = open + FENCE_OPEN.len();
        if let Some(len) = text[start..].find(FENCE_CLOSE) {
            return text[start..start + len].trim();
        }
    }
    text.trim()
}

fn apply_buckets(tasks: &mut TaskSet, object: &Map<String, Value>) {
    for priority in Priority::ALL {
        let Some(value) = object.get(priority.json_key()) else {
            continue;
        };
        if let Some(labels) = coerce_bucket(priority, value) {
            *tasks.bucket_mut(priority) = labels;
        }
    }
}

fn coerce_bucket(priority: Priority, value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| coerce_label(priority, item))
                .collect(),
        ),
        Value::String(label) if !label.is_empty() => Some(vec![label.clone()]),
        other => {
            warn!(bucket = priority.json_key(), value = %other, "ignoring non-list bucket value");
            None
        }
    }
}

fn coerce_label(priority: Priority, item: &Value) -> Option<String> {
    match item {
        Value::String(label) => Some(label.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => {
            warn!(bucket = priority.json_key(), element = %other, "dropping non-scalar task");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/extraction_tests.rs"]
mod tests;
