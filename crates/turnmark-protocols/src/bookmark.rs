//! Bookmark data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform::PlatformId;

/// Name of the in-page event fired after a bookmark is created.
pub const BOOKMARK_ADDED_EVENT: &str = "llm-bookmark-added";

/// Stored bookmarks keyed by bookmark id.
pub type BookmarkMap = BTreeMap<String, BookmarkEntry>;

/// What the relocation engine needs to find a response again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkTarget {
    pub platform: PlatformId,
    pub conversation_id: String,
    pub turn_id: String,
}

impl BookmarkTarget {
    pub fn new(
        platform: PlatformId,
        conversation_id: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            conversation_id: conversation_id.into(),
            turn_id: turn_id.into(),
        }
    }
}

/// A persisted bookmark for one LLM response.
///
/// Holds identifiers and a display title only, never the response content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkEntry {
    pub id: String,
    pub platform: PlatformId,
    pub conversation_id: String,
    pub turn_id: String,
    #[serde(default)]
    pub message_id: Option<String>,
    pub title: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl BookmarkEntry {
    /// The relocation target for this entry.
    pub fn target(&self) -> BookmarkTarget {
        BookmarkTarget::new(self.platform, &self.conversation_id, &self.turn_id)
    }

    /// Whether this entry bookmarks the given response.
    pub fn matches(&self, target: &BookmarkTarget) -> bool {
        self.platform == target.platform
            && self.conversation_id == target.conversation_id
            && self.turn_id == target.turn_id
    }
}

/// Notifications produced when the bookmark collection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkEvent {
    Added(BookmarkEntry),
    Removed(String),
    Renamed { id: String, title: String },
    Cleared,
}

impl BookmarkEvent {
    /// Name of the in-page DOM event mirroring this change, if one exists.
    pub fn dom_event(&self) -> Option<&'static str> {
        match self {
            Self::Added(_) => Some(BOOKMARK_ADDED_EVENT),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "bookmark_tests.rs"]
mod tests;
