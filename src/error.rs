//! Top-level error for the turnmark binary.

use thiserror::Error;

use turnmark_config::ConfigError;
use turnmark_core::DispatchError;
use turnmark_page_cdp::CdpError;
use turnmark_protocols::{PageError, StoreError};
use turnmark_store_json::JsonStoreError;

#[derive(Debug, Error)]
pub(crate) enum TurnmarkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration:\n{0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    JsonStore(#[from] JsonStoreError),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
