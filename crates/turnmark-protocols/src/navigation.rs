//! Per-platform locator and router contracts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PageError;
use crate::page::ElementHandle;
use crate::platform::PlatformId;

/// Knows where a platform keeps conversations and turns.
///
/// Implementations only read page state.
#[async_trait]
pub trait Locator: Send + Sync {
    fn platform(&self) -> PlatformId;

    /// Absolute URL of a conversation.
    fn canonical_url(&self, conversation_id: &str) -> String;

    /// Conversation the page currently displays, or `None` when the path
    /// does not identify one.
    async fn current_conversation_id(&self) -> Result<Option<String>, PageError>;

    /// The rendered element for a turn, if it is in the document.
    async fn find_turn_element(&self, turn_id: &str) -> Result<Option<ElementHandle>, PageError>;
}

/// How a router moved the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The document is being replaced; nothing more can run against it.
    FullLoad,
    /// The URL changed in place; the host app renders asynchronously.
    ClientSide,
}

/// Knows how a platform moves between conversations.
#[async_trait]
pub trait Router: Send + Sync {
    fn platform(&self) -> PlatformId;

    /// True iff the page origin is the platform origin.
    async fn is_on_platform(&self) -> Result<bool, PageError>;

    /// Full page load of the conversation, carrying the turn as auxiliary
    /// routing state where the platform supports it.
    async fn navigate_away(&self, conversation_id: &str, turn_id: &str) -> Result<(), PageError>;

    /// Move to the conversation from inside the platform. Client-side routers
    /// ignore `turn_id`.
    async fn navigate_within(
        &self,
        conversation_id: &str,
        turn_id: &str,
    ) -> Result<Transition, PageError>;
}

/// The capability pair registered for one platform.
#[derive(Clone)]
pub struct PlatformBinding {
    pub locator: Arc<dyn Locator>,
    pub router: Arc<dyn Router>,
}

impl PlatformBinding {
    pub fn new(locator: Arc<dyn Locator>, router: Arc<dyn Router>) -> Self {
        Self { locator, router }
    }

    pub fn platform(&self) -> PlatformId {
        self.router.platform()
    }
}
