//! Human-readable summaries of filters.

use std::fmt;

use super::ast::{Filter, FilterTag};

/// Description of a filter with no effective tags.
pub const NO_FILTER: &str = "no filter";

/// Renders a filter as a short human-readable sentence.
///
/// Each effective tag becomes `<field> <verb> <value>`; tags are listed
/// group by group in order of first appearance.
///
/// ```
/// use tabdeck_filter::filter::{describe_filter, FilterParser};
///
/// let filter = FilterParser::parse("title:foo -url:bar");
/// assert_eq!(
///     describe_filter(&filter),
///     "title contains foo url does not contain bar"
/// );
/// ```
pub fn describe_filter(filter: &Filter) -> String {
    let parts: Vec<String> = filter
        .groups()
        .map(|group| {
            group
                .tags()
                .map(describe_tag)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    if parts.is_empty() {
        NO_FILTER.to_string()
    } else {
        parts.join(" ")
    }
}

fn describe_tag(tag: &FilterTag) -> String {
    let verb = match (tag.is_negative(), tag.is_regex()) {
        (false, false) => "contains",
        (true, false) => "does not contain",
        (false, true) => "matches",
        (true, true) => "does not match",
    };
    let value = if tag.value().is_empty() {
        "\"\""
    } else {
        tag.value()
    };
    format!("{} {} {}", tag.field().label(), verb, value)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_filter(self))
    }
}
