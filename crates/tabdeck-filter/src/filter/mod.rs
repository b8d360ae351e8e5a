//! Filter expression parser and evaluator for tag-based card filters.
//!
//! A filter selects which bookmark and history items appear in a card.
//! Parsing and evaluation never fail: a bad filter degrades to literal text
//! matching, and [`validate_filter`] reports what is wrong with it.
//!
//! # Supported Syntax
//!
//! ## Free Text
//! - `rust` - Title or URL contains "rust"
//! - `"rust book"` - Quoted text keeps its spaces
//! - `/^rust/` - Title or URL matches a regex
//!
//! ## Field Tags
//! - `title:text` - Title contains the text
//! - `url:text` - URL contains the text
//! - `domain:*.example.com` - Host name matches a glob
//! - `dir:Work/**` - Bookmark folder matches a glob (history always passes)
//!
//! Values may be quoted (`title:"release notes"`) or regexes
//! (`url:/\.pdf$/i`). Regexes are always case-insensitive.
//!
//! ## Globs
//! - `*` - Any text within one domain label or one folder
//! - `**` - Any text across labels or folders
//!
//! ## Combining
//! - `-tag` - Exclude matches
//! - Tags on the same field are OR'd
//! - Different fields are AND'd
//! - Free text cannot be mixed with field tags
//!
//! # Example
//!
//! ```
//! use tabdeck_filter::filter::{describe_filter, validate_filter, FilterParser};
//! use tabdeck_model::models::Item;
//!
//! let input = "domain:github.com -title:archived";
//! assert!(validate_filter(input).is_ok());
//!
//! let filter = FilterParser::parse(input);
//! assert_eq!(
//!     describe_filter(&filter),
//!     "domain contains github.com title does not contain archived"
//! );
//!
//! let items = vec![
//!     Item::new("tabdeck", "https://github.com/tabdeck/tabdeck"),
//!     Item::new("old fork (archived)", "https://github.com/someone/fork"),
//! ];
//! let results = filter.filter_items(&items);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "tabdeck");
//! ```

mod ast;
mod describe;
mod error;
mod evaluator;
mod glob;
mod lexer;
mod parser;
mod validate;

pub use ast::{Field, FieldGroup, Filter, FilterTag, Pattern, RegexFallback, SUPPORTED_FIELDS};
pub use describe::{describe_filter, NO_FILTER};
pub use error::{FilterError, FilterResult, Validation};
pub use evaluator::{extract_domain, filter_items};
pub use glob::{match_domain_pattern, match_glob_pattern, normalize_folder_path};
pub use lexer::{Lexer, Token};
pub use parser::{parse_filter, parse_tag, FilterParser};
pub use validate::validate_filter;
