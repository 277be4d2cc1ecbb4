//! Bookmark collection operations.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info};
use uuid::Uuid;

use turnmark_protocols::{BookmarkEntry, BookmarkEvent, BookmarkStore, BookmarkTarget, StoreError};

const EVENT_CAPACITY: usize = 64;

/// Result of [`BookmarkBook::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleResult {
    Added(BookmarkEntry),
    Removed(BookmarkEntry),
}

/// Read-modify-write operations over a [`BookmarkStore`].
///
/// Writes are serialised so two toggles cannot lose each other's update.
pub struct BookmarkBook {
    store: Arc<dyn BookmarkStore>,
    events: broadcast::Sender<BookmarkEvent>,
    write_lock: Mutex<()>,
}

impl BookmarkBook {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            events,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStore> {
        &self.store
    }

    /// Receive change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<BookmarkEvent> {
        self.events.subscribe()
    }

    /// Bookmark a response, or remove the bookmark if it already exists.
    pub async fn toggle(
        &self,
        target: &BookmarkTarget,
        title: &str,
        message_id: Option<String>,
    ) -> Result<ToggleResult, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut bookmarks = self.store.get().await?;

        let existing = bookmarks
            .values()
            .find(|entry| entry.matches(target))
            .map(|entry| entry.id.clone());

        if let Some(id) = existing {
            let removed = bookmarks.remove(&id).ok_or(StoreError::NotFound(id))?;
            self.store.set(bookmarks).await?;
            info!("Removed bookmark {} ({})", removed.id, removed.title);
            self.emit(BookmarkEvent::Removed(removed.id.clone()));
            return Ok(ToggleResult::Removed(removed));
        }

        let entry = BookmarkEntry {
            id: Uuid::new_v4().to_string(),
            platform: target.platform,
            conversation_id: target.conversation_id.clone(),
            turn_id: target.turn_id.clone(),
            message_id,
            title: title.to_string(),
            created_at: Utc::now().timestamp_millis(),
        };
        bookmarks.insert(entry.id.clone(), entry.clone());
        self.store.set(bookmarks).await?;
        info!("Added bookmark {} ({})", entry.id, entry.title);
        self.emit(BookmarkEvent::Added(entry.clone()));
        Ok(ToggleResult::Added(entry))
    }

    /// Rename a bookmark. Blank titles are ignored.
    ///
    /// Returns whether anything changed.
    pub async fn rename(&self, id: &str, title: &str) -> Result<bool, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            debug!("Ignoring blank title for bookmark {}", id);
            return Ok(false);
        }

        let _guard = self.write_lock.lock().await;
        let mut bookmarks = self.store.get().await?;
        let Some(entry) = bookmarks.get_mut(id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        entry.title = title.to_string();
        self.store.set(bookmarks).await?;
        self.emit(BookmarkEvent::Renamed {
            id: id.to_string(),
            title: title.to_string(),
        });
        Ok(true)
    }

    pub async fn remove(&self, id: &str) -> Result<BookmarkEntry, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut bookmarks = self.store.get().await?;
        let removed = bookmarks
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.store.set(bookmarks).await?;
        info!("Removed bookmark {}", id);
        self.emit(BookmarkEvent::Removed(id.to_string()));
        Ok(removed)
    }

    /// Remove every bookmark.
    pub async fn clear(&self) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let count = self.store.get().await?.len();
        self.store.set(Default::default()).await?;
        info!("Cleared {} bookmarks", count);
        self.emit(BookmarkEvent::Cleared);
        Ok(count)
    }

    pub async fn get(&self, id: &str) -> Result<Option<BookmarkEntry>, StoreError> {
        Ok(self.store.get().await?.remove(id))
    }

    pub async fn is_bookmarked(&self, target: &BookmarkTarget) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get()
            .await?
            .values()
            .any(|entry| entry.matches(target)))
    }

    /// Bookmarks whose title contains `query` (ignoring case), newest first.
    pub async fn search(&self, query: &str) -> Result<Vec<BookmarkEntry>, StoreError> {
        let needle = query.to_lowercase();
        let mut entries: Vec<_> = self
            .store
            .get()
            .await?
            .into_values()
            .filter(|entry| entry.title.to_lowercase().contains(&needle))
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Every bookmark, newest first.
    pub async fn list(&self) -> Result<Vec<BookmarkEntry>, StoreError> {
        self.search("").await
    }

    fn emit(&self, event: BookmarkEvent) {
        if let Some(name) = event.dom_event() {
            debug!("Emitting {}", name);
        }
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod tests;
