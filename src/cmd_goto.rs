//! Relocation subcommands: goto, open, resume, classify.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use turnmark_config::Config;
use turnmark_core::{
    BindingRegistry, Dispatcher, PlatformRegistry, RelocationEngine, RelocationOutcome,
    RelocationSettings, TokioScheduler,
};
use turnmark_page_cdp::{CdpClient, CdpPage};
use turnmark_protocols::{BookmarkStore, BookmarkTarget, PageContext, PageError, PlatformId};

use crate::error::TurnmarkError;
use crate::open_store;

/// Redirects followed before giving up on a relocation.
const MAX_REDIRECTS: usize = 2;

/// Slack on top of the highlight duration before the process exits.
const HIGHLIGHT_GRACE: Duration = Duration::from_millis(200);

/// Where a freshly created tab starts out.
const BLANK_PAGE: &str = "about:blank";

/// A connected browser tab with the full relocation stack on top.
struct Browser {
    // Owns the socket the page talks through.
    _client: CdpClient,
    page: Arc<CdpPage>,
    dispatcher: Dispatcher,
    settings: RelocationSettings,
    load_timeout: Duration,
}

impl Browser {
    /// Attach to the active tab, or open a new one at `open_at`.
    async fn connect(config: &Config, open_at: Option<&str>) -> Result<Self, TurnmarkError> {
        let load_timeout = config.browser.load_timeout();
        let client = CdpClient::connect(&config.browser.endpoint).await?;
        let session = match open_at {
            Some(url) => {
                let session = client.new_page(url).await?;
                session.wait_for_navigation(BLANK_PAGE, load_timeout).await?;
                session
            }
            None => client.active_page().await?,
        };
        debug!("Using tab {}", session.target_id());

        let page = Arc::new(CdpPage::new(session));
        let settings = RelocationSettings::from(&config.engine);
        let engine = Arc::new(RelocationEngine::new(
            page.clone(),
            Arc::new(TokioScheduler::new()),
            settings.clone(),
        ));

        let bindings = Arc::new(BindingRegistry::new());
        bindings.register(turnmark_platform_chatgpt::binding(page.clone()));
        bindings.register(turnmark_platform_gemini::binding(page.clone()));

        Ok(Self {
            _client: client,
            page,
            dispatcher: Dispatcher::new(bindings, engine),
            settings,
            load_timeout,
        })
    }

    /// Relocate, following the full page loads the engine triggers.
    async fn relocate(&self, target: &BookmarkTarget) -> Result<RelocationOutcome, TurnmarkError> {
        let page = self.page.clone();
        let timeout = self.load_timeout;
        let outcome = self
            .dispatcher
            .navigate_following(target, MAX_REDIRECTS, move |before| {
                let page = page.clone();
                async move {
                    page.session()
                        .wait_for_navigation(&before, timeout)
                        .await
                        .map_err(PageError::from)
                }
            })
            .await?;
        Ok(outcome)
    }

    /// Keep the process alive until the highlight has been reverted.
    async fn settle(&self, outcome: &RelocationOutcome) {
        if outcome.is_located() {
            tokio::time::sleep(self.settings.highlight.duration + HIGHLIGHT_GRACE).await;
        }
    }
}

/// Address a new tab is opened at for `target`.
fn canonical_url(target: &BookmarkTarget) -> String {
    match target.platform {
        PlatformId::ChatGpt => turnmark_platform_chatgpt::canonical_url(&target.conversation_id),
        PlatformId::Gemini => turnmark_platform_gemini::canonical_url(&target.conversation_id),
    }
}

/// Explanation for a tab `resume` cannot work on, or `None` when the tab is
/// on a supported site.
fn unsupported_tab(href: &str) -> Option<String> {
    if PlatformRegistry::is_supported_url(href) {
        return None;
    }
    let hosts: Vec<&str> = PlatformId::ALL
        .iter()
        .flat_map(|platform| PlatformRegistry::hosts(*platform).iter().copied())
        .collect();
    Some(format!(
        "The active tab ({}) is not a supported chat; open a conversation on {}",
        href,
        hosts.join(", ")
    ))
}

fn report(target: &BookmarkTarget, outcome: &RelocationOutcome) {
    match outcome {
        RelocationOutcome::Located { lookups } => {
            println!("Found turn {} ({} lookups)", target.turn_id, lookups)
        }
        RelocationOutcome::Abandoned { lookups } => println!(
            "Turn {} did not appear after {} lookups",
            target.turn_id, lookups
        ),
        RelocationOutcome::Redirected(reason) => {
            println!("Navigation in progress ({:?})", reason)
        }
    }
}

/// Jump to a turn.
pub(crate) async fn goto(
    config: &Config,
    target: BookmarkTarget,
    new_tab: bool,
) -> Result<(), TurnmarkError> {
    let open_at = new_tab.then(|| canonical_url(&target));
    let browser = Browser::connect(config, open_at.as_deref()).await?;
    let outcome = browser.relocate(&target).await?;
    report(&target, &outcome);
    browser.settle(&outcome).await;
    Ok(())
}

/// Jump to a stored bookmark.
pub(crate) async fn open(config: &Config, id: &str, new_tab: bool) -> Result<(), TurnmarkError> {
    let store = open_store(config).await?;
    let entry = store
        .get()
        .await?
        .remove(id)
        .ok_or_else(|| TurnmarkError::BookmarkNotFound(id.to_string()))?;
    info!("Opening \"{}\"", entry.title);
    goto(config, entry.target(), new_tab).await
}

/// Finish a relocation announced in the active tab's URL.
pub(crate) async fn resume(config: &Config) -> Result<(), TurnmarkError> {
    let browser = Browser::connect(config, None).await?;
    let location = browser.page.location().await?;
    if let Some(message) = unsupported_tab(&location.href) {
        println!("{message}");
        return Ok(());
    }

    match browser.dispatcher.resume_from_location().await? {
        Some(outcome) => {
            let location = browser.page.location().await?;
            println!("Resumed on {}: {:?}", location.href, outcome);
            browser.settle(&outcome).await;
        }
        None => println!("Nothing to resume in the active tab"),
    }
    Ok(())
}

pub(crate) fn classify(host: &str) {
    let platform = PlatformRegistry::classify(host);
    println!("{platform}");
}
