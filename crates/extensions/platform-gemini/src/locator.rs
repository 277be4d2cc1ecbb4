use std::sync::Arc;

use async_trait::async_trait;

use turnmark_protocols::{
    ElementHandle, ElementQuery, Locator, PageContext, PageError, PlatformId,
};

const RESPONSE_ID_PREFIX: &str = "model-response-message-content";

pub struct GeminiLocator {
    page: Arc<dyn PageContext>,
}

impl GeminiLocator {
    pub fn new(page: Arc<dyn PageContext>) -> Self {
        Self { page }
    }

    /// Element id of a rendered response.
    pub fn turn_element_id(turn_id: &str) -> String {
        format!("{RESPONSE_ID_PREFIX}{turn_id}")
    }

    /// Conversation id when the pathname, minus one trailing `/`, is exactly
    /// `/app/{id}`.
    pub fn conversation_from_path(pathname: &str) -> Option<&str> {
        let path = pathname.strip_suffix('/').unwrap_or(pathname);
        path.strip_prefix("/app/")
            .filter(|id| !id.is_empty() && !id.contains('/'))
    }
}

#[async_trait]
impl Locator for GeminiLocator {
    fn platform(&self) -> PlatformId {
        PlatformId::Gemini
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
            .find(&ElementQuery::Id(Self::turn_element_id(turn_id)))
            .await
    }
}
