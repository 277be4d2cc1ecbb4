use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use turnmark_protocols::{PageContext, PageError, PlatformId, Router, Transition};

use crate::{ORIGIN, conversation_path};

pub struct GeminiRouter {
    page: Arc<dyn PageContext>,
}

impl GeminiRouter {
    pub fn new(page: Arc<dyn PageContext>) -> Self {
        Self { page }
    }
}

#[async_trait]
impl Router for GeminiRouter {
    fn platform(&self) -> PlatformId {
        PlatformId::Gemini
    }

    async fn is_on_platform(&self) -> Result<bool, PageError> {
        Ok(self.page.location().await?.origin == ORIGIN)
    }

    async fn navigate_away(&self, conversation_id: &str, _turn_id: &str) -> Result<(), PageError> {
        let href = format!("{ORIGIN}{}", conversation_path(conversation_id));
        debug!("Gemini: loading {}", href);
        self.page.assign(&href).await
    }

    async fn navigate_within(
        &self,
        conversation_id: &str,
        _turn_id: &str,
    ) -> Result<Transition, PageError> {
        let path = conversation_path(conversation_id);
        debug!("Gemini: pushing {}", path);
        self.page.push_state(&path).await?;
        Ok(Transition::ClientSide)
    }
}
