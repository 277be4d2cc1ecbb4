//! # turnmark Protocols
//!
//! Core type and trait definitions shared by every turnmark crate.
//! Contains only interface definitions - the engine lives in `turnmark-core`
//! and the concrete page/platform/store backends live in the extensions.
//!
//! ## Core Traits
//!
//! - [`PageContext`] - Read/write access to one browser page
//! - [`Locator`] - Per-platform URL building and turn element lookup
//! - [`Router`] - Per-platform navigation mechanics
//! - [`Scheduler`] - Timer and detached-task primitive
//! - [`BookmarkStore`] - Key-value bookmark persistence

pub mod bookmark;
pub mod error;
pub mod navigation;
pub mod page;
pub mod platform;
pub mod scheduler;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bookmark::{BookmarkEntry, BookmarkEvent, BookmarkMap, BookmarkTarget, BOOKMARK_ADDED_EVENT};
pub use error::{PageError, ProtocolError, StoreError};
pub use navigation::{Locator, PlatformBinding, Router, Transition};
pub use page::{ElementHandle, ElementQuery, PageContext, PageLocation, ScrollBehavior, ScrollBlock, ScrollOptions};
pub use platform::PlatformId;
pub use scheduler::Scheduler;
pub use store::BookmarkStore;
