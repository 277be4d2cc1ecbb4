//! Gemini support for turnmark.
//!
//! Conversations live at `https://gemini.google.com/app/{id}`. Gemini is a
//! client-routed app: pushing a new history entry is enough for it to render
//! the conversation, after which the response container with id
//! `model-response-message-content{turn}` shows up.

mod locator;
mod router;

use std::sync::Arc;

use turnmark_protocols::{PageContext, PlatformBinding};

pub use locator::GeminiLocator;
pub use router::GeminiRouter;

/// Platform origin.
pub const ORIGIN: &str = "https://gemini.google.com";

/// Absolute URL of a conversation.
pub fn canonical_url(conversation_id: &str) -> String {
    format!("{ORIGIN}{}", conversation_path(conversation_id))
}

/// Locator and router for Gemini on `page`.
pub fn binding(page: Arc<dyn PageContext>) -> PlatformBinding {
    PlatformBinding::new(
        Arc::new(GeminiLocator::new(Arc::clone(&page))),
        Arc::new(GeminiRouter::new(page)),
    )
}

/// Path of a conversation.
pub(crate) fn conversation_path(conversation_id: &str) -> String {
    format!("/app/{conversation_id}")
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
