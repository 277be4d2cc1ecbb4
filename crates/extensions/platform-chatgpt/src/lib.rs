//! ChatGPT support for turnmark.
//!
//! Conversations are addressed as `https://chatgpt.com/c/{id}` and every
//! rendered turn is an `<article data-turn-id="...">`. ChatGPT does not pick
//! up `history.pushState` changes, so moving between conversations is always
//! a full page load; the turn travels along in the `bookmark` query parameter.

mod locator;
mod router;

use std::sync::Arc;

use turnmark_protocols::{PageContext, PlatformBinding};

pub use locator::ChatGptLocator;
pub use router::ChatGptRouter;

/// Platform origin.
pub const ORIGIN: &str = "https://chatgpt.com";

/// Absolute URL of a conversation.
pub fn canonical_url(conversation_id: &str) -> String {
    format!("{ORIGIN}/c/{conversation_id}")
}

/// Locator and router for ChatGPT on `page`.
pub fn binding(page: Arc<dyn PageContext>) -> PlatformBinding {
    PlatformBinding::new(
        Arc::new(ChatGptLocator::new(Arc::clone(&page))),
        Arc::new(ChatGptRouter::new(page)),
    )
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
