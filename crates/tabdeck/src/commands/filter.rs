//! Filter command implementation.
//!
//! Filters a JSON file of items and prints the matches in input order.

use std::path::PathBuf;

use chrono::Utc;
use tabdeck_filter::filter::{validate_filter, FilterParser};
use tracing::warn;

use super::{source, CommandContext, Result};
use crate::output::{format_items_json, format_items_table};

/// Options for the filter command.
#[derive(Debug)]
pub struct FilterOptions {
    /// Filter expression.
    pub filter: String,
    /// JSON array of items.
    pub input: PathBuf,
    /// Maximum number of items to print.
    pub limit: Option<usize>,
}

/// Executes the filter command.
///
/// An invalid filter is reported as a warning and still applied, the same
/// way a stored card filter is.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed.
pub fn execute(ctx: &CommandContext, opts: &FilterOptions) -> Result<()> {
    let items = source::load_items(&opts.input)?;

    if let Err(e) = validate_filter(&opts.filter) {
        warn!("{e}; matching as plain text where needed");
    }

    let filter = FilterParser::parse(&opts.filter);
    let mut matched = filter.filter_items(&items);
    let total = matched.len();
    if let Some(limit) = opts.limit {
        matched.truncate(limit);
    }

    if ctx.json_output {
        println!("{}", format_items_json(&matched, total)?);
    } else if !ctx.quiet {
        print!("{}", format_items_table(&matched, Utc::now(), ctx.use_colors));
    }

    Ok(())
}
