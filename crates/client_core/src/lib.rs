//! Task board client: gateway calls, board state transitions and exports.

pub mod board;
pub mod export;
pub mod gateway;

pub use board::{
    categorize, BoardState, CategorizationOutcome, PARSE_FAILED_MESSAGE, REQUEST_FAILED_MESSAGE,
};
pub use export::{write_export, ExportError};
pub use gateway::{GatewayClient, GatewayClientError, PromptGateway};
