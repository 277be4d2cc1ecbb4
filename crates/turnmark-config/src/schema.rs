//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relocation timings and highlight styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Wait after a client-side route change before looking for the turn.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Interval between element lookups while waiting for a turn to render.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,

    /// Number of scheduled lookups after the first one misses.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// How long the highlight stays before the original colour returns.
    #[serde(default = "default_highlight_duration_ms")]
    pub highlight_duration_ms: u64,

    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    #[serde(default = "default_highlight_transition")]
    pub highlight_transition: String,
}

impl EngineConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            retry_interval_ms: default_retry_interval_ms(),
            retry_attempts: default_retry_attempts(),
            highlight_duration_ms: default_highlight_duration_ms(),
            highlight_color: default_highlight_color(),
            highlight_transition: default_highlight_transition(),
        }
    }
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_retry_interval_ms() -> u64 {
    300
}

fn default_retry_attempts() -> u32 {
    10
}

fn default_highlight_duration_ms() -> u64 {
    3000
}

fn default_highlight_color() -> String {
    "rgba(253,224,71,0.35)".to_string()
}

fn default_highlight_transition() -> String {
    "background-color 0.3s ease".to_string()
}

/// Browser connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Open bookmarks in a fresh tab instead of the active one.
    #[serde(default = "default_open_in_new_tab")]
    pub open_in_new_tab: bool,

    /// Upper bound on waiting for a full page load.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,
}

impl BrowserConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            open_in_new_tab: default_open_in_new_tab(),
            load_timeout_ms: default_load_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_open_in_new_tab() -> bool {
    true
}

fn default_load_timeout_ms() -> u64 {
    30_000
}

/// Bookmark store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("~/.turnmark/bookmarks.json")
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write daily-rotated log files under this directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
