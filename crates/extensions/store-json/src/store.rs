//! File-backed [`BookmarkStore`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info};

use turnmark_protocols::{BookmarkMap, BookmarkStore, StoreError};

use crate::error::JsonStoreError;

/// Top-level key of the bookmark document.
pub const STORAGE_KEY: &str = "my-bookmarks";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(rename = "my-bookmarks", default)]
    bookmarks: BookmarkMap,
}

/// Bookmarks persisted to a single JSON file.
///
/// The file is read once on open and rewritten on every `set`; reads are
/// served from memory.
pub struct JsonBookmarkStore {
    path: PathBuf,
    tx: watch::Sender<BookmarkMap>,
    write_lock: Mutex<()>,
}

impl JsonBookmarkStore {
    /// Open (or start) the bookmark file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, JsonStoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| JsonStoreError::CreateDirFailed {
                        path: parent.to_path_buf(),
                        reason: e.to_string(),
                    })?;
                info!("Created bookmark directory: {:?}", parent);
            }
        }

        let bookmarks = Self::read(&path).await?;
        info!("Loaded {} bookmarks from {:?}", bookmarks.len(), path);

        let (tx, _rx) = watch::channel(bookmarks);
        Ok(Self {
            path,
            tx,
            write_lock: Mutex::new(()),
        })
    }

    /// Open the store at `~/.turnmark/bookmarks.json`.
    pub async fn open_default() -> Result<Self, JsonStoreError> {
        let home = dirs::home_dir().ok_or(JsonStoreError::StoragePathNotSet)?;
        Self::open(home.join(".turnmark").join("bookmarks.json")).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up edits made by other processes.
    pub async fn reload(&self) -> Result<(), JsonStoreError> {
        let bookmarks = Self::read(&self.path).await?;
        self.tx.send_if_modified(|current| {
            if *current == bookmarks {
                return false;
            }
            *current = bookmarks;
            true
        });
        Ok(())
    }

    async fn read(path: &Path) -> Result<BookmarkMap, JsonStoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BookmarkMap::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(BookmarkMap::new());
        }

        let document: Document =
            serde_json::from_str(&content).map_err(|e| JsonStoreError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(document.bookmarks)
    }

    async fn write(&self, bookmarks: &BookmarkMap) -> Result<(), JsonStoreError> {
        let document = serde_json::json!({ STORAGE_KEY: bookmarks });
        let content = serde_json::to_string_pretty(&document)?;

        // Write then rename so readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!("Saved {} bookmarks to {:?}", bookmarks.len(), self.path);
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for JsonBookmarkStore {
    fn id(&self) -> &str {
        "json"
    }

    async fn get(&self) -> Result<BookmarkMap, StoreError> {
        Ok(self.tx.borrow().clone())
    }

    async fn set(&self, bookmarks: BookmarkMap) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(&bookmarks).await?;
        self.tx.send_replace(bookmarks);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<BookmarkMap> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
