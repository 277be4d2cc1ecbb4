//! JSON file storage for turnmark bookmarks.
//!
//! The whole collection lives in one document under the `my-bookmarks` key,
//! keyed by bookmark id:
//!
//! ```json
//! { "my-bookmarks": { "<id>": { "id": "<id>", "platform": "chatgpt", ... } } }
//! ```

mod error;
mod store;

pub use error::JsonStoreError;
pub use store::{JsonBookmarkStore, STORAGE_KEY};
