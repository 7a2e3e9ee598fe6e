//! Task board domain shared by the gateway server and its clients.

pub mod domain;
pub mod error;
pub mod export;
pub mod extraction;
pub mod prompt;
pub mod protocol;
