//! Page access errors.

use thiserror::Error;

/// Errors raised while reading or mutating a browser page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The transport to the page failed (socket closed, request dropped).
    #[error("Page transport failed: {0}")]
    Transport(String),

    /// A script evaluated inside the page threw.
    #[error("Page script failed: {0}")]
    Script(String),

    /// The page did not answer in time.
    #[error("Page timeout: {0}")]
    Timeout(String),

    /// The page location could not be parsed.
    #[error("Invalid page location: {0}")]
    InvalidLocation(String),

    /// The page is gone.
    #[error("Page closed")]
    Closed,
}

impl From<url::ParseError> for PageError {
    fn from(e: url::ParseError) -> Self {
        PageError::InvalidLocation(e.to_string())
    }
}
