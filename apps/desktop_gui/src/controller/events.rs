//! Backend-to-UI events.

use client_core::CategorizationOutcome;

pub enum UiEvent {
    Categorized(CategorizationOutcome),
    /// The worker could not start or lost its runtime.
    BackendFailed(String),
}
