//! [`PageContext`] over a CDP page session.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use turnmark_protocols::{
    ElementHandle, ElementQuery, PageContext, PageError, PageLocation, ScrollOptions,
};

use crate::error::CdpError;
use crate::script;
use crate::session::PageSession;

/// A live browser tab.
pub struct CdpPage {
    session: PageSession,
}

impl CdpPage {
    pub fn new(session: PageSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    async fn eval(&self, expression: &str) -> Result<Value, PageError> {
        Ok(self.session.evaluate(expression).await?)
    }

    /// Run a snippet that answers `false` when its element is gone.
    async fn eval_on_element(&self, query: &ElementQuery, expression: &str) -> Result<(), PageError> {
        match self.eval(expression).await? {
            Value::Bool(true) => Ok(()),
            _ => Err(detached(query)),
        }
    }
}

fn detached(query: &ElementQuery) -> PageError {
    PageError::Script(format!("element {:?} is no longer in the document", query))
}

#[async_trait]
impl PageContext for CdpPage {
    async fn location(&self) -> Result<PageLocation, PageError> {
        let value = self.eval(script::location()).await?;
        serde_json::from_value(value)
            .map_err(|e| PageError::from(CdpError::InvalidResponse(e.to_string())))
    }

    async fn assign(&self, href: &str) -> Result<(), PageError> {
        debug!("location.href = {}", href);
        self.eval(&script::assign(href)).await?;
        Ok(())
    }

    async fn push_state(&self, path: &str) -> Result<(), PageError> {
        debug!("history.pushState {}", path);
        self.eval(&script::push_state(path)).await?;
        Ok(())
    }

    async fn find(&self, query: &ElementQuery) -> Result<Option<ElementHandle>, PageError> {
        let found = self.eval(&script::exists(query)).await?;
        Ok((found == Value::Bool(true)).then(|| ElementHandle::new(query.clone())))
    }

    async fn scroll_into_view(
        &self,
        element: &ElementHandle,
        options: ScrollOptions,
    ) -> Result<(), PageError> {
        let query = element.query();
        self.eval_on_element(query, &script::scroll_into_view(query, options))
            .await
    }

    async fn style_property(
        &self,
        element: &ElementHandle,
        property: &str,
    ) -> Result<String, PageError> {
        let query = element.query();
        match self.eval(&script::style_property(query, property)).await? {
            Value::String(value) => Ok(value),
            _ => Err(detached(query)),
        }
    }

    async fn set_style_property(
        &self,
        element: &ElementHandle,
        property: &str,
        value: &str,
    ) -> Result<(), PageError> {
        let query = element.query();
        self.eval_on_element(query, &script::set_style_property(query, property, value))
            .await
    }
}
