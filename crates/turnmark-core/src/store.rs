//! In-memory bookmark store.

use async_trait::async_trait;
use tokio::sync::watch;

use turnmark_protocols::{BookmarkMap, BookmarkStore, StoreError};

/// A [`BookmarkStore`] that lives as long as the process.
pub struct MemoryBookmarkStore {
    id: String,
    tx: watch::Sender<BookmarkMap>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::with_bookmarks(BookmarkMap::new())
    }

    pub fn with_bookmarks(bookmarks: BookmarkMap) -> Self {
        let (tx, _rx) = watch::channel(bookmarks);
        Self {
            id: "memory".to_string(),
            tx,
        }
    }
}

impl Default for MemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    fn id(&self) -> &str {
        &self.id
    }

    async fn get(&self) -> Result<BookmarkMap, StoreError> {
        Ok(self.tx.borrow().clone())
    }

    async fn set(&self, bookmarks: BookmarkMap) -> Result<(), StoreError> {
        self.tx.send_replace(bookmarks);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<BookmarkMap> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use turnmark_protocols::{BookmarkEntry, PlatformId};

    fn entry(id: &str) -> BookmarkEntry {
        BookmarkEntry {
            id: id.to_string(),
            platform: PlatformId::Gemini,
            conversation_id: "c".to_string(),
            turn_id: "t".to_string(),
            message_id: None,
            title: "title".to_string(),
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let store = MemoryBookmarkStore::new();
        assert_eq!(store.id(), "memory");
        assert!(store.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryBookmarkStore::default();
        let mut map = BookmarkMap::new();
        map.insert("a".to_string(), entry("a"));
        store.set(map.clone()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), map);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = MemoryBookmarkStore::new();
        let mut rx = store.subscribe();

        let mut map = BookmarkMap::new();
        map.insert("a".to_string(), entry("a"));
        store.set(map).await.unwrap();

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().contains_key("a"));
    }
}
