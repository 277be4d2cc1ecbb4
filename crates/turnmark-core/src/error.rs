//! Engine and dispatch errors.

use thiserror::Error;

use turnmark_protocols::{PageError, PlatformId};

/// Errors that stop a relocation.
///
/// A turn that never renders is not an error; it ends as
/// [`RelocationOutcome::Abandoned`](crate::RelocationOutcome::Abandoned).
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The caller asked for a platform nobody registered an adapter for.
    #[error("No locator/router registered for platform: {0}")]
    UnregisteredPlatform(PlatformId),

    #[error("Relocation failed: {0}")]
    Relocation(#[from] RelocationError),

    #[error("Page error: {0}")]
    Page(#[from] PageError),
}
