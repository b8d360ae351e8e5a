//! Error types for filter validation.

use serde::Serialize;
use thiserror::Error;

/// A specialized Result type for filter validation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Problems found when validating a filter expression.
///
/// Parsing and evaluation never fail; these errors are only produced by
/// [`validate_filter`](super::validate_filter) so an editor can flag a bad
/// filter before it is saved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A `/pattern/` term failed to compile.
    #[error("invalid regular expression: {pattern}{}", unsupported_syntax_hint(.message))]
    InvalidRegex {
        /// The pattern source, without the surrounding slashes.
        pattern: String,
        /// The compiler's explanation.
        message: String,
    },

    /// One or more `name:` prefixes are not supported fields.
    #[error("unsupported tag: {}{}", .fields.join(", "), did_you_mean(.suggestion))]
    UnsupportedField {
        /// The unsupported field names, deduplicated, in order of appearance.
        fields: Vec<String>,
        /// The closest supported field, if one is close enough.
        suggestion: Option<String>,
    },

    /// Free text was combined with field-scoped tags.
    #[error("free text \"{token}\" cannot be combined with field tags")]
    MixedTerms {
        /// The first offending bare term.
        token: String,
    },

    /// Parsing failed unexpectedly.
    #[error("failed to parse filter: {message}")]
    Parse {
        /// Description of the failure.
        message: String,
    },
}

/// Regexes run in linear time, so look-around and backreferences are
/// rejected by the engine even though browsers accept them.
fn unsupported_syntax_hint(message: &str) -> &'static str {
    if message.contains("not supported") {
        " (look-around and backreferences are not supported; patterns must match in linear time)"
    } else {
        ""
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an invalid regex error.
    pub fn invalid_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        FilterError::InvalidRegex {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a mixed terms error.
    pub fn mixed_terms(token: impl Into<String>) -> Self {
        FilterError::MixedTerms {
            token: token.into(),
        }
    }

    /// Creates a generic parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        FilterError::Parse {
            message: message.into(),
        }
    }
}

/// Outcome of validating a filter, in `{valid, error}` form.
///
/// `error` is empty when the filter is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub error: String,
}

impl From<FilterResult<()>> for Validation {
    fn from(result: FilterResult<()>) -> Self {
        match result {
            Ok(()) => Validation {
                valid: true,
                error: String::new(),
            },
            Err(e) => Validation {
                valid: false,
                error: e.to_string(),
            },
        }
    }
}
