//! Check command implementation.
//!
//! Validates a filter expression and prints what it selects.

use tabdeck_filter::filter::{validate_filter, FilterParser};

use super::{CommandContext, Result};
use crate::output::{format_check_json, format_check_table};

/// Options for the check command.
#[derive(Debug)]
pub struct CheckOptions {
    /// Filter expression.
    pub filter: String,
    /// List the parsed tags.
    pub explain: bool,
}

/// Executes the check command.
///
/// # Errors
///
/// Returns [`CommandError::Filter`](super::CommandError::Filter) if the
/// filter is invalid.
pub fn execute(ctx: &CommandContext, opts: &CheckOptions) -> Result<()> {
    validate_filter(&opts.filter)?;
    let filter = FilterParser::parse(&opts.filter);

    if ctx.json_output {
        println!("{}", format_check_json(&filter)?);
    } else if !ctx.quiet {
        print!("{}", format_check_table(&filter, opts.explain, ctx.use_colors));
    }

    Ok(())
}
