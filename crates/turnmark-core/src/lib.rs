//! # turnmark Core
//!
//! The relocation engine and everything around it.
//!
//! ## Components
//!
//! - [`PlatformRegistry`] - Hostname to platform classification
//! - [`BindingRegistry`] - Platform to (Locator, Router) lookup
//! - [`RelocationEngine`] - The redirect / soft-navigate / scroll state machine
//! - [`Highlighter`] - Detached background flash on a located turn
//! - [`Dispatcher`] - Platform-agnostic entry point used by callers
//! - [`BookmarkBook`] - Bookmark collection operations over a [`BookmarkStore`]
//!
//! [`BookmarkStore`]: turnmark_protocols::BookmarkStore

pub mod book;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod registry;
pub mod resume;
pub mod scheduler;
pub mod store;
#[cfg(test)]
mod test_support;

pub use book::{BookmarkBook, ToggleResult};
pub use dispatch::Dispatcher;
pub use engine::{NavigationState, Redirect, RelocationEngine, RelocationOutcome, RelocationSettings};
pub use error::{DispatchError, RelocationError};
pub use highlight::{HighlightStyle, Highlighter};
pub use registry::{BindingRegistry, PlatformRegistry, PlatformRow, MATCH_PATTERNS, PLATFORMS};
pub use resume::BOOKMARK_QUERY_PARAM;
pub use scheduler::TokioScheduler;
pub use store::MemoryBookmarkStore;
