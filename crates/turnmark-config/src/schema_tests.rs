use super::*;

#[test]
fn test_engine_defaults() {
    let engine = EngineConfig::default();
    assert_eq!(engine.settle_delay(), Duration::from_millis(500));
    assert_eq!(engine.retry_interval(), Duration::from_millis(300));
    assert_eq!(engine.retry_attempts, 10);
    assert_eq!(engine.highlight_duration(), Duration::from_millis(3000));
    assert_eq!(engine.highlight_color, "rgba(253,224,71,0.35)");
    assert_eq!(engine.highlight_transition, "background-color 0.3s ease");
}

#[test]
fn test_browser_defaults() {
    let browser = BrowserConfig::default();
    assert_eq!(browser.endpoint, "http://localhost:9222");
    assert!(browser.open_in_new_tab);
    assert_eq!(browser.load_timeout(), Duration::from_secs(30));
}

#[test]
fn test_partial_engine_section_keeps_other_defaults() {
    let config: Config = toml::from_str(
        r#"
        [engine]
        retry_attempts = 3
        "#,
    )
    .unwrap();
    assert_eq!(config.engine.retry_attempts, 3);
    assert_eq!(config.engine.retry_interval_ms, 300);
    assert_eq!(config.browser.endpoint, "http://localhost:9222");
}

#[test]
fn test_store_default_path() {
    let store = StoreConfig::default();
    assert_eq!(store.path, PathBuf::from("~/.turnmark/bookmarks.json"));
}

#[test]
fn test_logging_round_trips_without_dir() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert!(!text.contains("dir ="));
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.logging.level, "info");
}
