//! Filter engine for tabdeck cards.
//!
//! The [`filter`] module parses, evaluates, validates and describes the
//! tag-based filter language. [`card`] assembles a card's items from its
//! sources using a filter.

pub mod card;
pub mod filter;

pub use card::collect_card_items;
pub use filter::{
    describe_filter, filter_items, parse_filter, validate_filter, Filter, FilterError,
    FilterParser, FilterResult, FilterTag, Validation,
};
