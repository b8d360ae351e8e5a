//! Command implementations for the tabdeck CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod card;
pub mod check;
pub mod completions;
pub mod config;
pub mod filter;
pub mod source;

use std::env;

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter validation error.
    #[error("filter error: {0}")]
    Filter(#[from] tabdeck_filter::FilterError),

    /// Missing or unreadable item source.
    #[error("source error: {0}")]
    Source(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are on unless `--no-color`, a non-empty `NO_COLOR`, or
    /// `output.color = false` turns them off.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
        }
    }
}
