//! Temporary background flash on a located turn.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use turnmark_config::EngineConfig;
use turnmark_protocols::{ElementHandle, PageContext, PageError, Scheduler};

const BACKGROUND_COLOR: &str = "background-color";
const TRANSITION: &str = "transition";

/// Colour, transition and duration of the flash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub color: String,
    pub transition: String,
    pub duration: Duration,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for HighlightStyle {
    fn from(config: &EngineConfig) -> Self {
        Self {
            color: config.highlight_color.clone(),
            transition: config.highlight_transition.clone(),
            duration: config.highlight_duration(),
        }
    }
}

/// Flashes elements on one page.
#[derive(Clone)]
pub struct Highlighter {
    page: Arc<dyn PageContext>,
    scheduler: Arc<dyn Scheduler>,
    style: HighlightStyle,
}

impl Highlighter {
    pub fn new(
        page: Arc<dyn PageContext>,
        scheduler: Arc<dyn Scheduler>,
        style: HighlightStyle,
    ) -> Self {
        Self {
            page,
            scheduler,
            style,
        }
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Start a flash on `element` as a detached task and return immediately.
    pub fn flash(&self, element: ElementHandle) {
        let this = self.clone();
        self.scheduler.spawn(Box::pin(async move {
            if let Err(e) = this.run(&element).await {
                warn!("Highlight on {:?} failed: {}", element.query(), e);
            }
        }));
    }

    /// Apply the flash and, after the configured duration, put back the
    /// element's original inline background (or none).
    pub async fn run(&self, element: &ElementHandle) -> Result<(), PageError> {
        let original = self.page.style_property(element, BACKGROUND_COLOR).await?;
        self.page
            .set_style_property(element, TRANSITION, &self.style.transition)
            .await?;
        self.page
            .set_style_property(element, BACKGROUND_COLOR, &self.style.color)
            .await?;
        debug!("Highlight applied to {:?}", element.query());

        self.scheduler.sleep(self.style.duration).await;

        self.page
            .set_style_property(element, BACKGROUND_COLOR, &original)
            .await?;
        debug!("Highlight reverted on {:?}", element.query());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use turnmark_protocols::ElementQuery;
    use turnmark_protocols::testing::{FakePage, RecordingScheduler};

    fn setup(page: Arc<FakePage>) -> (Highlighter, Arc<RecordingScheduler>) {
        let scheduler = Arc::new(RecordingScheduler::new());
        let highlighter = Highlighter::new(page, scheduler.clone(), HighlightStyle::default());
        (highlighter, scheduler)
    }

    #[test]
    fn test_default_style() {
        let style = HighlightStyle::default();
        assert_eq!(style.color, "rgba(253,224,71,0.35)");
        assert_eq!(style.transition, "background-color 0.3s ease");
        assert_eq!(style.duration, Duration::from_millis(3000));
    }

    #[tokio::test]
    async fn test_flash_is_deferred() {
        let page = Arc::new(FakePage::at("https://chatgpt.com/"));
        let query = ElementQuery::Id("t".into());
        page.insert(query.clone());
        let (highlighter, scheduler) = setup(page.clone());

        highlighter.flash(ElementHandle::new(query));

        assert_eq!(scheduler.pending_tasks(), 1);
        assert!(page.style_writes().is_empty());
    }

    #[tokio::test]
    async fn test_flash_restores_original_background() {
        let page = Arc::new(FakePage::at("https://chatgpt.com/"));
        let query = ElementQuery::Id("t".into());
        page.insert_with_styles(query.clone(), &[("background-color", "blue")]);
        let (highlighter, scheduler) = setup(page.clone());

        highlighter.flash(ElementHandle::new(query.clone()));
        scheduler.run_spawned().await;

        let writes = page.style_writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0].1, "transition");
        assert_eq!(writes[0].2, "background-color 0.3s ease");
        assert_eq!(writes[1].2, "rgba(253,224,71,0.35)");
        assert_eq!(writes[2].2, "blue");
        assert_eq!(page.style(&query, "background-color"), "blue");
        assert_eq!(scheduler.sleeps(), vec![Duration::from_millis(3000)]);
    }

    #[tokio::test]
    async fn test_flash_clears_background_when_none_was_set() {
        let page = Arc::new(FakePage::at("https://chatgpt.com/"));
        let query = ElementQuery::Id("t".into());
        page.insert(query.clone());
        let (highlighter, scheduler) = setup(page.clone());

        highlighter.flash(ElementHandle::new(query.clone()));
        scheduler.run_spawned().await;

        let last = page.style_writes().pop().unwrap();
        assert_eq!(last.1, "background-color");
        assert_eq!(last.2, "");
        assert_eq!(page.style(&query, "background-color"), "");
    }

    #[tokio::test]
    async fn test_flash_failure_is_swallowed() {
        let page = Arc::new(FakePage::at("https://chatgpt.com/"));
        let query = ElementQuery::Id("t".into());
        page.insert(query.clone());
        page.fail_on("set_style_property");
        let (highlighter, scheduler) = setup(page.clone());

        highlighter.flash(ElementHandle::new(query.clone()));
        scheduler.run_spawned().await;

        assert!(page.style_writes().is_empty());
        assert!(scheduler.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_run_reports_failure() {
        let page = Arc::new(FakePage::at("https://chatgpt.com/"));
        let query = ElementQuery::Id("t".into());
        page.fail_on("style_property");
        let (highlighter, _) = setup(page);

        let result = highlighter.run(&ElementHandle::new(query)).await;
        assert!(matches!(result, Err(PageError::Transport(_))));
    }
}
