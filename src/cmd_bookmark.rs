//! Bookmark subcommands: mark, list, rename, remove, clear.

use std::io::Write;

use turnmark_config::Config;
use turnmark_core::{BookmarkBook, ToggleResult};
use turnmark_protocols::{BookmarkEntry, BookmarkTarget};

use crate::cli::OutputFormat;
use crate::error::TurnmarkError;
use crate::open_store;

async fn book(config: &Config) -> Result<BookmarkBook, TurnmarkError> {
    Ok(BookmarkBook::new(open_store(config).await?))
}

pub(crate) async fn mark(
    config: &Config,
    target: BookmarkTarget,
    title: &str,
    message_id: Option<String>,
) -> Result<(), TurnmarkError> {
    match book(config).await?.toggle(&target, title, message_id).await? {
        ToggleResult::Added(entry) => println!("Added {} \"{}\"", entry.id, entry.title),
        ToggleResult::Removed(entry) => println!("Removed {} \"{}\"", entry.id, entry.title),
    }
    Ok(())
}

pub(crate) async fn list(
    config: &Config,
    query: Option<&str>,
    format: OutputFormat,
) -> Result<(), TurnmarkError> {
    let entries = book(config).await?.search(query.unwrap_or_default()).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => print_table(&entries),
    }
    Ok(())
}

fn print_table(entries: &[BookmarkEntry]) {
    if entries.is_empty() {
        println!("No bookmarks.");
        return;
    }

    println!("{:<36}  {:<8}  {:<20}  TITLE", "ID", "PLATFORM", "CREATED");
    for entry in entries {
        let created = chrono::DateTime::from_timestamp_millis(entry.created_at)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{:<36}  {:<8}  {:<20}  {}",
            entry.id, entry.platform, created, entry.title
        );
    }
}

pub(crate) async fn rename(config: &Config, id: &str, title: &str) -> Result<(), TurnmarkError> {
    if book(config).await?.rename(id, title).await? {
        println!("Renamed {}", id);
    } else {
        println!("Title is empty, nothing changed");
    }
    Ok(())
}

pub(crate) async fn remove(config: &Config, id: &str) -> Result<(), TurnmarkError> {
    let removed = book(config).await?.remove(id).await?;
    println!("Removed {} \"{}\"", removed.id, removed.title);
    Ok(())
}

pub(crate) async fn clear(config: &Config, yes: bool) -> Result<(), TurnmarkError> {
    if !yes && !confirm("Delete all bookmarks?")? {
        println!("Aborted");
        return Ok(());
    }
    let count = book(config).await?.clear().await?;
    println!("Deleted {} bookmarks", count);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, TurnmarkError> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
