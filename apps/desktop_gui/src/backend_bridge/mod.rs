//! Worker thread owning the tokio runtime and the gateway client.

pub mod commands;
pub mod runtime;
