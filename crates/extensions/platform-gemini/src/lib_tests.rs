use super::*;

use std::time::Duration;

use turnmark_core::{Redirect, RelocationEngine, RelocationOutcome, RelocationSettings};
use turnmark_protocols::testing::{FakePage, RecordingScheduler};
use turnmark_protocols::{
    BookmarkTarget, ElementQuery, Locator, PlatformId, Router, ScrollOptions,
};

fn setup(href: &str) -> (Arc<FakePage>, Arc<RecordingScheduler>, RelocationEngine) {
    let page = Arc::new(FakePage::at(href));
    let scheduler = Arc::new(RecordingScheduler::new());
    let engine = RelocationEngine::new(
        page.clone(),
        scheduler.clone(),
        RelocationSettings::default(),
    );
    (page, scheduler, engine)
}

fn response(turn_id: &str) -> ElementQuery {
    ElementQuery::Id(format!("model-response-message-content{turn_id}"))
}

fn target(conversation_id: &str, turn_id: &str) -> BookmarkTarget {
    BookmarkTarget::new(PlatformId::Gemini, conversation_id, turn_id)
}

#[test]
fn test_canonical_url() {
    let locator = GeminiLocator::new(Arc::new(FakePage::at("https://gemini.google.com/")));
    assert_eq!(
        locator.canonical_url("abc"),
        "https://gemini.google.com/app/abc"
    );
    assert_eq!(locator.canonical_url("abc"), canonical_url("abc"));
    assert_eq!(locator.platform(), PlatformId::Gemini);
}

#[tokio::test]
async fn test_is_on_platform() {
    let on = GeminiRouter::new(Arc::new(FakePage::at("https://gemini.google.com/app")));
    assert!(on.is_on_platform().await.unwrap());

    let off = GeminiRouter::new(Arc::new(FakePage::at("https://chatgpt.com/")));
    assert!(!off.is_on_platform().await.unwrap());
}

#[tokio::test]
async fn test_off_origin_loads_conversation_without_turn() {
    let (page, _scheduler, engine) = setup("https://chatgpt.com/c/abc");
    let binding = binding(page.clone());

    let outcome = engine.relocate(&binding, &target("abc", "r_1")).await.unwrap();

    assert_eq!(outcome, RelocationOutcome::Redirected(Redirect::CrossOrigin));
    assert_eq!(
        page.assignments(),
        vec!["https://gemini.google.com/app/abc".to_string()]
    );
}

#[tokio::test]
async fn test_other_conversation_pushes_state_once() {
    let (page, scheduler, engine) = setup("https://gemini.google.com/app/old");
    page.insert(response("r_1"));
    let binding = binding(page.clone());

    let outcome = engine.relocate(&binding, &target("new", "r_1")).await.unwrap();

    assert!(outcome.is_located());
    assert_eq!(page.pushed_paths(), vec!["/app/new".to_string()]);
    assert!(page.assignments().is_empty());
    assert_eq!(scheduler.sleeps()[0], Duration::from_millis(500));
    assert_eq!(
        page.location_now().unwrap().href,
        "https://gemini.google.com/app/new"
    );
}

#[tokio::test]
async fn test_trailing_slash_counts_as_same_conversation() {
    let (page, scheduler, engine) = setup("https://gemini.google.com/app/abc/");
    page.insert(response("r_3"));
    let binding = binding(page.clone());

    let outcome = engine.relocate(&binding, &target("abc", "r_3")).await.unwrap();

    assert_eq!(outcome, RelocationOutcome::Located { lookups: 1 });
    assert!(page.pushed_paths().is_empty());
    assert!(scheduler.sleeps().is_empty());
}

#[tokio::test]
async fn test_same_conversation_scrolls_to_response() {
    let (page, scheduler, engine) = setup("https://gemini.google.com/app/abc");
    page.insert_with_styles(response("r_3"), &[("background-color", "transparent")]);
    let binding = binding(page.clone());

    let outcome = engine.relocate(&binding, &target("abc", "r_3")).await.unwrap();

    assert!(outcome.is_located());
    assert_eq!(
        page.scrolls(),
        vec![(response("r_3"), ScrollOptions::smooth_center())]
    );
    scheduler.run_spawned().await;
    assert_eq!(page.style(&response("r_3"), "background-color"), "transparent");
}

#[tokio::test]
async fn test_slow_render_after_push_state() {
    let (page, scheduler, engine) = setup("https://gemini.google.com/app");
    page.insert_after(response("r_2"), 3);
    let binding = binding(page.clone());

    let outcome = engine.relocate(&binding, &target("abc", "r_2")).await.unwrap();

    assert_eq!(outcome, RelocationOutcome::Located { lookups: 3 });
    assert_eq!(
        scheduler.sleeps(),
        vec![
            Duration::from_millis(500),
            Duration::from_millis(300),
            Duration::from_millis(300)
        ]
    );
}
