use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use turnmark_protocols::{PageContext, PageError, PlatformId, Router, Transition};

use crate::ORIGIN;

pub struct ChatGptRouter {
    page: Arc<dyn PageContext>,
}

impl ChatGptRouter {
    pub fn new(page: Arc<dyn PageContext>) -> Self {
        Self { page }
    }

    /// Path of a conversation with the pending turn attached.
    pub fn bookmark_path(conversation_id: &str, turn_id: &str) -> String {
        format!("/c/{conversation_id}?bookmark={turn_id}")
    }
}

#[async_trait]
impl Router for ChatGptRouter {
    fn platform(&self) -> PlatformId {
        PlatformId::ChatGpt
    }

    async fn is_on_platform(&self) -> Result<bool, PageError> {
        Ok(self.page.location().await?.origin == ORIGIN)
    }

    async fn navigate_away(&self, conversation_id: &str, turn_id: &str) -> Result<(), PageError> {
        let href = format!("{ORIGIN}{}", Self::bookmark_path(conversation_id, turn_id));
        debug!("ChatGPT: loading {}", href);
        self.page.assign(&href).await
    }

    async fn navigate_within(
        &self,
        conversation_id: &str,
        turn_id: &str,
    ) -> Result<Transition, PageError> {
        let path = Self::bookmark_path(conversation_id, turn_id);
        debug!("ChatGPT: reloading into {}", path);
        self.page.assign(&path).await?;
        Ok(Transition::FullLoad)
    }
}
