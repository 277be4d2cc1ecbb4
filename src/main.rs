//! turnmark - bookmark LLM chat responses and jump back to them.
//!
//! Main entry point for the turnmark CLI.

mod cli;
mod cmd_bookmark;
mod cmd_goto;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use turnmark_config::{Config, ConfigLoader, ConfigValidator};
use turnmark_protocols::{BookmarkStore, BookmarkTarget};
use turnmark_store_json::JsonBookmarkStore;

use crate::cli::{Cli, Commands};
use crate::error::TurnmarkError;

fn turnmark_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".turnmark")
}

fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = config
        .logging
        .dir
        .as_deref()
        .map(ConfigLoader::expand_path)
        .unwrap_or_else(|| turnmark_dir().join("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("turnmark")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>, endpoint: Option<String>) -> Result<Config, TurnmarkError> {
    let mut config = match path {
        Some(path) => ConfigLoader::load(&ConfigLoader::expand_path(path))?,
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path())?,
    };
    if let Some(endpoint) = endpoint {
        config.browser.endpoint = endpoint;
    }
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), TurnmarkError> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("config {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        let errors: Vec<_> = result
            .errors
            .iter()
            .map(|e| format!("  {}: {}", e.path, e.message))
            .collect();
        return Err(TurnmarkError::InvalidConfig(errors.join("\n")));
    }
    Ok(())
}

pub(crate) async fn open_store(config: &Config) -> Result<Arc<dyn BookmarkStore>, TurnmarkError> {
    let path = ConfigLoader::expand_path(&config.store.path);
    debug!("Bookmark store: {:?}", path);
    Ok(Arc::new(JsonBookmarkStore::open(path).await?))
}

async fn run(cli: Cli, config: Config) -> Result<(), TurnmarkError> {
    match cli.command {
        Commands::Goto {
            platform,
            conversation_id,
            turn_id,
            tab,
        } => {
            let target = BookmarkTarget::new(platform, conversation_id, turn_id);
            let new_tab = tab.open_in_new_tab(config.browser.open_in_new_tab);
            cmd_goto::goto(&config, target, new_tab).await
        }
        Commands::Open { id, tab } => {
            let new_tab = tab.open_in_new_tab(config.browser.open_in_new_tab);
            cmd_goto::open(&config, &id, new_tab).await
        }
        Commands::Resume => cmd_goto::resume(&config).await,
        Commands::Classify { host } => {
            cmd_goto::classify(&host);
            Ok(())
        }
        Commands::Mark {
            platform,
            conversation_id,
            turn_id,
            title,
            message_id,
        } => {
            let target = BookmarkTarget::new(platform, conversation_id, turn_id);
            cmd_bookmark::mark(&config, target, &title, message_id).await
        }
        Commands::List { query, format } => {
            cmd_bookmark::list(&config, query.as_deref(), format).await
        }
        Commands::Rename { id, title } => cmd_bookmark::rename(&config, &id, &title).await,
        Commands::Remove { id } => cmd_bookmark::remove(&config, &id).await,
        Commands::Clear { yes } => cmd_bookmark::clear(&config, yes).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.endpoint.clone())?;
    init_tracing(&config)?;
    validate_config(&config)?;

    run(cli, config).await?;
    Ok(())
}
