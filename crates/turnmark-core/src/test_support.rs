//! Adapters for a made-up platform used across unit tests.
//!
//! Conversations live at `https://app.test/c/{id}`; turns are `#turn-{id}`.

use std::sync::Arc;

use async_trait::async_trait;

use turnmark_protocols::testing::FakePage;
use turnmark_protocols::{
    ElementHandle, ElementQuery, Locator, PageContext, PageError, PlatformBinding, PlatformId,
    Router, Transition,
};

pub const ORIGIN: &str = "https://app.test";

pub struct TestLocator {
    pub page: Arc<FakePage>,
}

#[async_trait]
impl Locator for TestLocator {
    fn platform(&self) -> PlatformId {
        PlatformId::ChatGpt
    }

    fn canonical_url(&self, conversation_id: &str) -> String {
        format!("{ORIGIN}/c/{conversation_id}")
    }

    async fn current_conversation_id(&self) -> Result<Option<String>, PageError> {
        let location = self.page.location().await?;
        Ok(location
            .pathname
            .strip_prefix("/c/")
            .filter(|id| !id.is_empty())
            .map(str::to_string))
    }

    async fn find_turn_element(&self, turn_id: &str) -> Result<Option<ElementHandle>, PageError> {
        self.page.find(&turn_query(turn_id)).await
    }
}

pub struct TestRouter {
    pub page: Arc<FakePage>,
    pub transition: Transition,
}

#[async_trait]
impl Router for TestRouter {
    fn platform(&self) -> PlatformId {
        PlatformId::ChatGpt
    }

    async fn is_on_platform(&self) -> Result<bool, PageError> {
        Ok(self.page.location().await?.origin == ORIGIN)
    }

    async fn navigate_away(&self, conversation_id: &str, turn_id: &str) -> Result<(), PageError> {
        self.page
            .assign(&format!("{ORIGIN}/c/{conversation_id}?bookmark={turn_id}"))
            .await
    }

    async fn navigate_within(
        &self,
        conversation_id: &str,
        turn_id: &str,
    ) -> Result<Transition, PageError> {
        match self.transition {
            Transition::FullLoad => {
                self.page
                    .assign(&format!("/c/{conversation_id}?bookmark={turn_id}"))
                    .await?
            }
            Transition::ClientSide => {
                self.page
                    .push_state(&format!("/c/{conversation_id}"))
                    .await?
            }
        }
        Ok(self.transition)
    }
}

pub fn turn_query(turn_id: &str) -> ElementQuery {
    ElementQuery::Id(format!("turn-{turn_id}"))
}

pub fn test_binding(page: &Arc<FakePage>, transition: Transition) -> PlatformBinding {
    PlatformBinding::new(
        Arc::new(TestLocator { page: page.clone() }),
        Arc::new(TestRouter {
            page: page.clone(),
            transition,
        }),
    )
}
