//! Card command implementation.
//!
//! Assembles a card from bookmark and history exports the way the new-tab
//! page does: gather, window, dedupe, filter, truncate.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tabdeck_filter::collect_card_items;
use tabdeck_filter::filter::{describe_filter, validate_filter, FilterParser};
use tabdeck_model::models::{CardConfig, Item, SourceKind};
use tracing::{debug, warn};

use super::config::Config;
use super::{source, CommandContext, CommandError, Result};
use crate::cli::SourceArg;
use crate::output::{format_card_json, format_card_table};

/// Options for the card command.
#[derive(Debug, Default)]
pub struct CardOptions {
    /// Card title.
    pub title: String,
    /// Sources requested on the command line.
    pub sources: Vec<SourceArg>,
    /// Filter expression.
    pub filter: Option<String>,
    /// History window in days.
    pub history_days: Option<u32>,
    /// Maximum number of items.
    pub max_items: Option<usize>,
    /// Bookmark export path override.
    pub bookmarks: Option<PathBuf>,
    /// History export path override.
    pub history: Option<PathBuf>,
}

/// Source files resolved from flags and config.
#[derive(Debug, PartialEq)]
struct ResolvedSources {
    kinds: Vec<SourceKind>,
    bookmarks: Option<PathBuf>,
    history: Option<PathBuf>,
}

/// Executes the card command.
///
/// # Errors
///
/// Returns an error if no source is available, a requested source has no
/// file, or a source file cannot be read.
pub fn execute(ctx: &CommandContext, opts: &CardOptions, config: &Config) -> Result<()> {
    let card = build_card(opts, config);
    let sources = resolve_sources(opts, config)?;

    let bookmarks = load_source(sources.bookmarks.as_deref(), source::load_bookmarks)?;
    let history = load_source(sources.history.as_deref(), source::load_history)?;

    if let Err(e) = validate_filter(&card.filter) {
        warn!("{e}; matching as plain text where needed");
    }

    let card = CardConfig {
        sources: sources.kinds,
        ..card
    };
    let items = collect_card_items(&card, &bookmarks, &history, Utc::now());
    let description = describe_filter(&FilterParser::parse(&card.filter));

    if ctx.json_output {
        println!(
            "{}",
            format_card_json(&card.title, &card.filter, &description, &items)?
        );
    } else if !ctx.quiet {
        print!(
            "{}",
            format_card_table(&card.title, &description, &items, Utc::now(), ctx.use_colors)
        );
    }

    Ok(())
}

/// Builds the card settings: flags first, then config, then defaults.
fn build_card(opts: &CardOptions, config: &Config) -> CardConfig {
    let mut card = CardConfig::new(opts.title.clone(), Vec::new())
        .with_filter(opts.filter.clone().unwrap_or_default());
    if let Some(max_items) = opts.max_items.or(config.card.max_items) {
        card.max_items = max_items;
    }
    card.history_days = opts.history_days.or(config.card.history_days);
    card
}

/// Works out which sources to read and from where.
///
/// Without `--source`, every source with a known file is used.
fn resolve_sources(opts: &CardOptions, config: &Config) -> Result<ResolvedSources> {
    let bookmarks = opts
        .bookmarks
        .clone()
        .or_else(|| config.sources.bookmarks.clone());
    let history = opts.history.clone().or_else(|| config.sources.history.clone());

    let mut kinds: Vec<SourceKind> = Vec::new();
    if opts.sources.is_empty() {
        if bookmarks.is_some() {
            kinds.push(SourceKind::Bookmarks);
        }
        if history.is_some() {
            kinds.push(SourceKind::History);
        }
        if kinds.is_empty() {
            return Err(CommandError::Source(
                "no sources configured. Pass --bookmarks/--history or set sources.bookmarks/sources.history".to_string(),
            ));
        }
    } else {
        for kind in opts.sources.iter().copied().map(SourceKind::from) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }

    let bookmarks = if kinds.contains(&SourceKind::Bookmarks) {
        Some(bookmarks.ok_or_else(|| missing_source("bookmarks"))?)
    } else {
        None
    };
    let history = if kinds.contains(&SourceKind::History) {
        Some(history.ok_or_else(|| missing_source("history"))?)
    } else {
        None
    };

    debug!(?kinds, ?bookmarks, ?history, "resolved card sources");
    Ok(ResolvedSources {
        kinds,
        bookmarks,
        history,
    })
}

fn missing_source(name: &str) -> CommandError {
    CommandError::Source(format!(
        "no {name} file. Pass --{name} or set sources.{name}"
    ))
}

fn load_source(path: Option<&Path>, load: fn(&Path) -> Result<Vec<Item>>) -> Result<Vec<Item>> {
    match path {
        Some(path) => load(path),
        None => Ok(Vec::new()),
    }
}
