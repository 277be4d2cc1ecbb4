//! CDP session attached to a single page.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::client::Transport;
use crate::error::CdpError;
use crate::protocol::ExceptionDetails;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A session attached to a single page/target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        trace!("evaluate: {}", expression);
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let message = serde_json::from_value::<ExceptionDetails>(exception.clone())
                .map(|details| details.message())
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CdpError::JavaScript(message));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Wait until the page has left `previous_href` and the new document is
    /// interactive.
    ///
    /// Polls `readyState` every 100 ms. Evaluation errors other than a lost
    /// connection are ignored while the old document is torn down.
    pub async fn wait_for_navigation(
        &self,
        previous_href: &str,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            match self
                .evaluate("({ state: document.readyState, href: location.href })")
                .await
            {
                Ok(value) => {
                    let state = value["state"].as_str().unwrap_or_default();
                    let href = value["href"].as_str().unwrap_or_default();
                    if href != previous_href && matches!(state, "complete" | "interactive") {
                        debug!("Navigated to {}", href);
                        return Ok(());
                    }
                    trace!("Waiting on {} ({})", href, state);
                }
                Err(e @ (CdpError::SessionClosed | CdpError::WebSocket(_))) => return Err(e),
                Err(e) => trace!("Page not ready: {}", e),
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "page did not leave {} within {:?}",
                    previous_href, timeout
                )));
            }

            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }
}
