//! CLI definitions for turnmark.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use turnmark_protocols::PlatformId;

/// turnmark CLI.
#[derive(Parser)]
#[command(name = "turnmark")]
#[command(about = "Bookmark LLM chat responses and jump back to them")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.turnmark/config.toml)
    #[arg(short, long, global = true, env = "TURNMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Chrome debugging endpoint, overrides `browser.endpoint`
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Jump to a turn of a conversation
    Goto {
        /// Platform (chatgpt, gemini)
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// Conversation ID
        conversation_id: String,

        /// Turn ID
        turn_id: String,

        #[command(flatten)]
        tab: TabArgs,
    },

    /// Jump to a stored bookmark
    Open {
        /// Bookmark ID
        id: String,

        #[command(flatten)]
        tab: TabArgs,
    },

    /// Finish a relocation pending in the active tab's URL
    Resume,

    /// Show which platform a hostname belongs to
    Classify {
        /// Hostname, e.g. chat.openai.com
        host: String,
    },

    /// Bookmark a turn, or remove the bookmark if it exists
    Mark {
        /// Platform (chatgpt, gemini)
        #[arg(value_parser = parse_platform)]
        platform: PlatformId,

        /// Conversation ID
        conversation_id: String,

        /// Turn ID
        turn_id: String,

        /// Display title
        #[arg(short, long, default_value = "Untitled response")]
        title: String,

        /// Platform message ID
        #[arg(long)]
        message_id: Option<String>,
    },

    /// List bookmarks, newest first
    List {
        /// Only titles containing this text (case-insensitive)
        query: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Rename a bookmark
    Rename {
        /// Bookmark ID
        id: String,

        /// New title
        title: String,
    },

    /// Delete a bookmark
    Remove {
        /// Bookmark ID
        id: String,
    },

    /// Delete every bookmark
    Clear {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

/// Which tab a relocation runs in.
#[derive(clap::Args, Clone, Copy)]
pub(crate) struct TabArgs {
    /// Open in a new tab (overrides `browser.open_in_new_tab`)
    #[arg(long, conflicts_with = "same_tab")]
    pub new_tab: bool,

    /// Reuse the active tab (overrides `browser.open_in_new_tab`)
    #[arg(long)]
    pub same_tab: bool,
}

impl TabArgs {
    pub fn open_in_new_tab(&self, default: bool) -> bool {
        match (self.new_tab, self.same_tab) {
            (true, _) => true,
            (_, true) => false,
            _ => default,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn parse_platform(s: &str) -> Result<PlatformId, String> {
    s.parse().map_err(|e| format!("{e}"))
}
