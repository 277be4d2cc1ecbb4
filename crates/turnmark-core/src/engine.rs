//! Relocation engine.
//!
//! Drives a page to a bookmarked turn in three phases:
//!
//! 1. Wrong origin: one full navigation to the conversation, then stop.
//! 2. Wrong (or unknown) conversation: one in-platform navigation. A full
//!    load stops here; a client-side route change settles and continues.
//! 3. Right conversation: look the turn up, retrying on a fixed interval
//!    until it renders or the attempt budget runs out. A hit is scrolled to
//!    the centre of the viewport and flashed.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use turnmark_config::EngineConfig;
use turnmark_protocols::{
    BookmarkTarget, ElementHandle, Locator, PageContext, PlatformBinding, Router, Scheduler,
    ScrollOptions, Transition,
};

use crate::error::RelocationError;
use crate::highlight::{HighlightStyle, Highlighter};

/// Timings the engine runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationSettings {
    /// Wait after a client-side route change.
    pub settle_delay: Duration,
    /// Gap between two turn lookups.
    pub retry_interval: Duration,
    /// Lookups allowed after the first miss.
    pub retry_attempts: u32,
    pub highlight: HighlightStyle,
}

impl Default for RelocationSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for RelocationSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            settle_delay: config.settle_delay(),
            retry_interval: config.retry_interval(),
            retry_attempts: config.retry_attempts,
            highlight: HighlightStyle::from(config),
        }
    }
}

/// Per-invocation retry bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub target: BookmarkTarget,
    pub attempts_remaining: u32,
}

impl NavigationState {
    pub fn new(target: BookmarkTarget, attempts: u32) -> Self {
        Self {
            target,
            attempts_remaining: attempts,
        }
    }

    /// Spend one retry. Returns `false` once the budget is exhausted.
    pub fn consume_attempt(&mut self) -> bool {
        if self.attempts_remaining == 0 {
            return false;
        }
        self.attempts_remaining -= 1;
        true
    }
}

/// Why a relocation ended in a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The page was on another origin.
    CrossOrigin,
    /// The page was on the platform but showed another conversation, and the
    /// platform routes with full page loads.
    CrossConversation,
}

/// How a relocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// The document is being replaced; the turn will be found after the load.
    Redirected(Redirect),
    /// The turn was scrolled into view and highlighted.
    Located { lookups: u32 },
    /// The turn never rendered within the retry budget.
    Abandoned { lookups: u32 },
}

impl RelocationOutcome {
    pub fn is_located(&self) -> bool {
        matches!(self, Self::Located { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    WrongOrigin,
    WrongConversation,
    Settling,
    SameConversation,
    Retrying,
}

/// The shared relocation state machine.
pub struct RelocationEngine {
    page: Arc<dyn PageContext>,
    scheduler: Arc<dyn Scheduler>,
    settings: RelocationSettings,
    highlighter: Highlighter,
}

impl RelocationEngine {
    pub fn new(
        page: Arc<dyn PageContext>,
        scheduler: Arc<dyn Scheduler>,
        settings: RelocationSettings,
    ) -> Self {
        let highlighter = Highlighter::new(
            Arc::clone(&page),
            Arc::clone(&scheduler),
            settings.highlight.clone(),
        );
        Self {
            page,
            scheduler,
            settings,
            highlighter,
        }
    }

    pub fn settings(&self) -> &RelocationSettings {
        &self.settings
    }

    pub fn page(&self) -> &Arc<dyn PageContext> {
        &self.page
    }

    /// Move the page towards `target` using the platform's binding.
    pub async fn relocate(
        &self,
        binding: &PlatformBinding,
        target: &BookmarkTarget,
    ) -> Result<RelocationOutcome, RelocationError> {
        let BookmarkTarget {
            platform,
            conversation_id,
            turn_id,
        } = target;

        if !binding.router.is_on_platform().await? {
            debug!(phase = ?Phase::WrongOrigin, %platform, "Leaving foreign origin");
            binding.router.navigate_away(conversation_id, turn_id).await?;
            info!(
                "Navigating to {} for turn {}",
                binding.locator.canonical_url(conversation_id),
                turn_id
            );
            return Ok(RelocationOutcome::Redirected(Redirect::CrossOrigin));
        }

        let current = binding.locator.current_conversation_id().await?;
        if current.as_deref() != Some(conversation_id.as_str()) {
            debug!(
                phase = ?Phase::WrongConversation,
                %platform,
                current = ?current,
                "Switching conversation to {}",
                conversation_id
            );
            match binding
                .router
                .navigate_within(conversation_id, turn_id)
                .await?
            {
                Transition::FullLoad => {
                    info!("Reloading into conversation {} for turn {}", conversation_id, turn_id);
                    return Ok(RelocationOutcome::Redirected(Redirect::CrossConversation));
                }
                Transition::ClientSide => {
                    debug!(phase = ?Phase::Settling, "Waiting {:?} for route change", self.settings.settle_delay);
                    self.scheduler.sleep(self.settings.settle_delay).await;
                }
            }
        }

        self.locate(binding, target).await
    }

    async fn locate(
        &self,
        binding: &PlatformBinding,
        target: &BookmarkTarget,
    ) -> Result<RelocationOutcome, RelocationError> {
        let mut state = NavigationState::new(target.clone(), self.settings.retry_attempts);
        let mut lookups = 0;
        let mut phase = Phase::SameConversation;

        loop {
            lookups += 1;
            if let Some(element) = binding.locator.find_turn_element(&state.target.turn_id).await? {
                debug!(phase = ?phase, lookups, "Found turn {}", state.target.turn_id);
                self.reveal(element).await?;
                return Ok(RelocationOutcome::Located { lookups });
            }

            if !state.consume_attempt() {
                debug!(
                    lookups,
                    "Turn {} did not render, giving up", state.target.turn_id
                );
                return Ok(RelocationOutcome::Abandoned { lookups });
            }

            phase = Phase::Retrying;
            debug!(
                phase = ?phase,
                remaining = state.attempts_remaining,
                "Turn {} not rendered yet",
                state.target.turn_id
            );
            self.scheduler.sleep(self.settings.retry_interval).await;
        }
    }

    async fn reveal(&self, element: ElementHandle) -> Result<(), RelocationError> {
        self.page
            .scroll_into_view(&element, ScrollOptions::smooth_center())
            .await?;
        self.highlighter.flash(element);
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
