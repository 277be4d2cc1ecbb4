//! Platform-agnostic entry point into the relocation engine.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use turnmark_protocols::{BookmarkEntry, BookmarkTarget, PageContext, PageError, PlatformId};

use crate::engine::{RelocationEngine, RelocationOutcome};
use crate::error::DispatchError;
use crate::registry::BindingRegistry;

/// Resolves the adapters for a platform and hands the target to the engine.
#[derive(Clone)]
pub struct Dispatcher {
    bindings: Arc<BindingRegistry>,
    engine: Arc<RelocationEngine>,
}

impl Dispatcher {
    pub fn new(bindings: Arc<BindingRegistry>, engine: Arc<RelocationEngine>) -> Self {
        Self { bindings, engine }
    }

    pub fn bindings(&self) -> &Arc<BindingRegistry> {
        &self.bindings
    }

    pub fn engine(&self) -> &Arc<RelocationEngine> {
        &self.engine
    }

    /// Relocate to a turn on `platform`.
    pub async fn navigate_to_bookmark(
        &self,
        platform: PlatformId,
        conversation_id: &str,
        turn_id: &str,
    ) -> Result<RelocationOutcome, DispatchError> {
        self.navigate(&BookmarkTarget::new(platform, conversation_id, turn_id))
            .await
    }

    /// Relocate to a stored bookmark.
    pub async fn navigate_to_entry(
        &self,
        entry: &BookmarkEntry,
    ) -> Result<RelocationOutcome, DispatchError> {
        info!("Opening bookmark {} ({})", entry.id, entry.title);
        self.navigate(&entry.target()).await
    }

    pub async fn navigate(&self, target: &BookmarkTarget) -> Result<RelocationOutcome, DispatchError> {
        let binding = self.bindings.get(target.platform)?;
        let outcome = self.engine.relocate(&binding, target).await?;
        info!(
            platform = %target.platform,
            "Relocation to {}/{} ended: {:?}",
            target.conversation_id,
            target.turn_id,
            outcome
        );
        Ok(outcome)
    }

    /// Relocate across full page loads.
    ///
    /// Each time the engine leaves the document, `wait_for_load` is called
    /// with the href from before the relocation and must return once the new
    /// document is up; the relocation then runs again. After `max_redirects`
    /// loads the last `Redirected` outcome is returned as is.
    pub async fn navigate_following<W, F>(
        &self,
        target: &BookmarkTarget,
        max_redirects: usize,
        mut wait_for_load: W,
    ) -> Result<RelocationOutcome, DispatchError>
    where
        W: FnMut(String) -> F,
        F: Future<Output = Result<(), PageError>>,
    {
        let mut redirects = 0;
        loop {
            let before = self.engine.page().location().await?.href;
            let outcome = self.navigate(target).await?;

            let RelocationOutcome::Redirected(reason) = outcome else {
                return Ok(outcome);
            };
            if redirects == max_redirects {
                warn!("Still redirecting after {} loads, stopping", redirects);
                return Ok(outcome);
            }
            redirects += 1;

            info!("Waiting for page load ({:?})", reason);
            wait_for_load(before).await?;
        }
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
