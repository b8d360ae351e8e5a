//! Static validation of filter expressions.

use std::panic::{self, AssertUnwindSafe};

use strsim::levenshtein;

use super::ast::{Filter, SUPPORTED_FIELDS};
use super::error::{FilterError, FilterResult};
use super::parser::FilterParser;

/// Maximum edit distance for suggesting a supported field name.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Validates a filter string.
///
/// Blank input is valid. Otherwise the checks run in this order and the
/// first failure is returned:
///
/// 1. a `/pattern/` that does not compile
/// 2. `name:` prefixes that are not supported fields
/// 3. bare text alongside field-scoped tags
///
/// # Example
///
/// ```
/// use tabdeck_filter::filter::{validate_filter, FilterError};
///
/// assert!(validate_filter("title:foo title:bar").is_ok());
/// assert_eq!(
///     validate_filter("title:foo bar"),
///     Err(FilterError::mixed_terms("bar"))
/// );
/// ```
pub fn validate_filter(input: &str) -> FilterResult<()> {
    if input.trim().is_empty() {
        return Ok(());
    }

    let filter = panic::catch_unwind(AssertUnwindSafe(|| FilterParser::parse(input)))
        .map_err(|payload| FilterError::parse(panic_message(payload.as_ref())))?;
    filter.validate()
}

impl Filter {
    /// Checks an already-parsed filter. See [`validate_filter`].
    pub fn validate(&self) -> FilterResult<()> {
        let mut unsupported: Vec<String> = Vec::new();
        let mut stray_text: Option<&str> = None;

        for tag in self.tags() {
            if let Some(fallback) = tag.regex_fallback() {
                return Err(FilterError::invalid_regex(
                    fallback.pattern.clone(),
                    fallback.message.clone(),
                ));
            }

            if let Some(name) = tag.unknown_field() {
                if !unsupported.iter().any(|n| n == name) {
                    unsupported.push(name.to_string());
                }
            }

            if self.is_inert(tag) && stray_text.is_none() {
                stray_text = Some(tag.value());
            }
        }

        if !unsupported.is_empty() {
            let suggestion = suggest_field(&unsupported);
            return Err(FilterError::UnsupportedField {
                fields: unsupported,
                suggestion,
            });
        }

        if let Some(token) = stray_text {
            return Err(FilterError::mixed_terms(token));
        }

        Ok(())
    }
}

/// Finds the supported field closest to any of the unsupported names.
fn suggest_field(unsupported: &[String]) -> Option<String> {
    let (best, distance) = unsupported
        .iter()
        .flat_map(|name| {
            SUPPORTED_FIELDS
                .iter()
                .map(move |field| (*field, levenshtein(name, field)))
        })
        .min_by_key(|(_, d)| *d)?;

    if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
        Some(best.to_string())
    } else {
        None
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal error".to_string()
    }
}
