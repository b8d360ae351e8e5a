//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they need the user's config loaded first.
//! Config and completions commands must work even when the config file is
//! missing or broken, so they never read it.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::card::CardOptions;
use crate::commands::check::CheckOptions;
use crate::commands::config::Config;
use crate::commands::filter::FilterOptions;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without loading the config file.
pub trait StandaloneCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read settings from the config file.
pub trait ConfiguredCommand {
    /// Execute the command with the loaded configuration.
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()>;
}

/// Commands that don't need the config file.
pub enum StandaloneDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> StandaloneDispatch<'a> {
    /// Try to create a standalone dispatch from the CLI command.
    /// Returns None if the command needs the config file.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl StandaloneCommand for StandaloneDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("tabdeck - bookmark and history cards");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => commands::config::execute_edit(ctx),
    }
}

/// Commands that read the config file.
#[derive(Debug)]
pub enum ConfiguredDispatch {
    Check(CheckOptions),
    Filter(FilterOptions),
    Card(CardOptions),
}

impl ConfiguredDispatch {
    /// Create a configured dispatch from the CLI command.
    /// Returns None for standalone commands.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Check { filter, explain }) => Some(Self::Check(CheckOptions {
                filter: filter.clone(),
                explain: *explain,
            })),
            Some(Commands::Filter {
                filter,
                input,
                limit,
            }) => Some(Self::Filter(FilterOptions {
                filter: filter.clone(),
                input: input.clone(),
                limit: *limit,
            })),
            Some(Commands::Card {
                title,
                sources,
                filter,
                history_days,
                max_items,
                bookmarks,
                history,
            }) => Some(Self::Card(CardOptions {
                title: title.clone(),
                sources: sources.clone(),
                filter: filter.clone(),
                history_days: *history_days,
                max_items: *max_items,
                bookmarks: bookmarks.clone(),
                history: history.clone(),
            })),
            Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) | None => None,
        }
    }
}

impl ConfiguredCommand for ConfiguredDispatch {
    fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()> {
        match self {
            Self::Check(opts) => commands::check::execute(ctx, opts),
            Self::Filter(opts) => commands::filter::execute(ctx, opts),
            Self::Card(opts) => commands::card::execute(ctx, opts, config),
        }
    }
}
