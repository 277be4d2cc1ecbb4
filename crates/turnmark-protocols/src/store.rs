//! Bookmark persistence contract.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::bookmark::BookmarkMap;
use crate::error::StoreError;

/// Key-value store holding the bookmark mapping.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Returns the store ID.
    fn id(&self) -> &str;

    /// Read the whole mapping.
    async fn get(&self) -> Result<BookmarkMap, StoreError>;

    /// Replace the whole mapping and notify subscribers.
    async fn set(&self, bookmarks: BookmarkMap) -> Result<(), StoreError>;

    /// Watch the mapping for changes.
    fn subscribe(&self) -> watch::Receiver<BookmarkMap>;
}
