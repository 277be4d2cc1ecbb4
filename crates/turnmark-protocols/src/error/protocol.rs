//! Top-level protocol error type.

use thiserror::Error;

use super::{PageError, StoreError};

/// Top-level protocol error type.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
