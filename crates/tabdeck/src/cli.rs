//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tabdeck CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tabdeck_model::models::SourceKind;

/// tabdeck - Filter bookmarks and history into cards
#[derive(Parser, Debug)]
#[command(name = "tabdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output (also disabled by NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a filter expression and describe what it selects
    #[command(alias = "c")]
    Check {
        /// Filter expression (e.g., "dir:Work/** -domain:*.cn")
        filter: String,

        /// List the parsed tags
        #[arg(short, long)]
        explain: bool,
    },

    /// Filter a JSON file of items
    #[command(alias = "f")]
    Filter {
        /// Filter expression
        filter: String,

        /// JSON array of items ({title, url, folder?, lastVisitTime?, visitCount?})
        #[arg(short, long)]
        input: PathBuf,

        /// Show at most this many items
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Assemble a card from bookmark and history exports
    Card {
        /// Card title
        #[arg(short, long, default_value = "Card")]
        title: String,

        /// Source to draw from (repeatable; default: every configured source)
        #[arg(short, long = "source", value_enum, action = clap::ArgAction::Append)]
        sources: Vec<SourceArg>,

        /// Filter expression applied to the card
        #[arg(short, long)]
        filter: Option<String>,

        /// Only keep history visited within this many days
        #[arg(long)]
        history_days: Option<u32>,

        /// Maximum number of items (default: config, else 100)
        #[arg(short, long)]
        max_items: Option<usize>,

        /// Bookmark tree JSON (default: sources.bookmarks from config)
        #[arg(long)]
        bookmarks: Option<PathBuf>,

        /// History JSON array (default: sources.history from config)
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Item sources for the card command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
    Bookmarks,
    History,
}

impl From<SourceArg> for SourceKind {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Bookmarks => SourceKind::Bookmarks,
            SourceArg::History => SourceKind::History,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., sources.history)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
