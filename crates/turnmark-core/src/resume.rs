//! Finishing a relocation after the full page load it triggered.
//!
//! Routers that leave the document carry the turn id in the `bookmark` query
//! parameter. Once the new page is up, [`Dispatcher::resume_from_location`]
//! picks it up and runs the engine against the conversation now on screen.

use tracing::debug;

use turnmark_protocols::{BookmarkTarget, Locator, PageContext, PageLocation};

use crate::dispatch::Dispatcher;
use crate::engine::RelocationOutcome;
use crate::error::DispatchError;
use crate::registry::PlatformRegistry;

/// Query parameter carrying a pending turn id.
pub const BOOKMARK_QUERY_PARAM: &str = "bookmark";

/// The pending turn id in `location`, if any.
pub fn pending_turn(location: &PageLocation) -> Option<String> {
    location
        .query_param(BOOKMARK_QUERY_PARAM)
        .filter(|turn| !turn.is_empty())
}

impl Dispatcher {
    /// Resume a relocation announced in the current URL.
    ///
    /// Returns `None` when the page carries no pending turn or does not show
    /// a conversation.
    pub async fn resume_from_location(&self) -> Result<Option<RelocationOutcome>, DispatchError> {
        let location = self.engine().page().location().await?;
        let Some(turn_id) = pending_turn(&location) else {
            debug!("No pending bookmark in {}", location.href);
            return Ok(None);
        };

        let platform = PlatformRegistry::classify(&location.host);
        let binding = self.bindings().get(platform)?;
        let Some(conversation_id) = binding.locator.current_conversation_id().await? else {
            debug!("Pending bookmark {} but no conversation in {}", turn_id, location.pathname);
            return Ok(None);
        };

        let target = BookmarkTarget::new(platform, conversation_id, turn_id);
        self.navigate(&target).await.map(Some)
    }
}
