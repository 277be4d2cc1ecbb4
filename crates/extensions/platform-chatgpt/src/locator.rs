use std::sync::Arc;

use async_trait::async_trait;

use turnmark_protocols::{
    ElementHandle, ElementQuery, Locator, PageContext, PageError, PlatformId,
};

const CONVERSATION_SEGMENT: &str = "/c/";

pub struct ChatGptLocator {
    page: Arc<dyn PageContext>,
}

impl ChatGptLocator {
    pub fn new(page: Arc<dyn PageContext>) -> Self {
        Self { page }
    }

    /// Selector for a rendered turn.
    pub fn turn_selector(turn_id: &str) -> String {
        let escaped = turn_id.replace('\\', "\\\\").replace('"', "\\\"");
        format!("article[data-turn-id=\"{escaped}\"]")
    }

    /// Conversation id in a pathname: the segment after the first `/c/`.
    pub fn conversation_from_path(pathname: &str) -> Option<&str> {
        pathname
            .split(CONVERSATION_SEGMENT)
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .filter(|id| !id.is_empty())
    }
}

#[async_trait]
impl Locator for ChatGptLocator {
    fn platform(&self) -> PlatformId {
        PlatformId::ChatGpt
    }

    fn canonical_url(&self, conversation_id: &str) -> String {
        crate::canonical_url(conversation_id)
    }

    async fn current_conversation_id(&self) -> Result<Option<String>, PageError> {
        let location = self.page.location().await?;
        Ok(Self::conversation_from_path(&location.pathname).map(str::to_string))
    }

    async fn find_turn_element(&self, turn_id: &str) -> Result<Option<ElementHandle>, PageError> {
        self.page
            .find(&ElementQuery::Selector(Self::turn_selector(turn_id)))
            .await
    }
}
