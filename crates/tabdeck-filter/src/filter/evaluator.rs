//! Filter evaluation against items.
//!
//! # Example
//!
//! ```
//! use tabdeck_filter::filter::FilterParser;
//! use tabdeck_model::models::Item;
//!
//! let filter = FilterParser::parse("title:rust title:cargo -domain:**.cn");
//!
//! let docs = Item::new("The Rust Book", "https://doc.rust-lang.org/book/");
//! let mirror = Item::new("Rust mirror", "https://rust.mirrors.example.cn/");
//!
//! assert!(filter.matches(&docs));
//! assert!(!filter.matches(&mirror));
//! ```

use tabdeck_model::models::Item;
use url::Url;

use super::ast::{Field, Filter, FilterTag, Pattern};
use super::glob::normalize_folder_path;
use super::parser::FilterParser;

impl FilterTag {
    /// Returns true if the item satisfies this tag, negation included.
    ///
    /// Two field rules apply before negation:
    ///
    /// - `domain:` never matches an item whose URL has no host, so a
    ///   negated domain tag always passes it.
    /// - `dir:` only constrains bookmarks. For items without a folder the
    ///   tag is satisfied whether or not it is negated, so a card mixing
    ///   bookmarks and history keeps its history entries.
    pub fn matches(&self, item: &Item) -> bool {
        let matched = match self.field() {
            Field::Title => self.matches_text(&item.title),
            Field::Url => self.matches_text(&item.url),
            Field::Bare => self.matches_text(&item.title) || self.matches_text(&item.url),
            Field::Domain => match extract_domain(&item.url) {
                Some(host) => self.matches_domain(&host),
                None => false,
            },
            Field::Dir => match item.folder_path() {
                Some(folder) => self.matches_folder(folder),
                None => return true,
            },
        };

        matched != self.is_negative()
    }

    fn matches_text(&self, text: &str) -> bool {
        match self.pattern() {
            Pattern::Regex(re) => re.is_match(text),
            Pattern::Literal(_) => text.to_lowercase().contains(self.needle()),
        }
    }

    fn matches_domain(&self, host: &str) -> bool {
        match self.pattern() {
            Pattern::Regex(re) => re.is_match(host),
            Pattern::Literal(value) if value.is_empty() => true,
            Pattern::Literal(_) => match self.glob() {
                Some(glob) => glob.is_match(host),
                None => host.to_lowercase().contains(self.needle()),
            },
        }
    }

    fn matches_folder(&self, folder: &str) -> bool {
        let path = normalize_folder_path(folder);
        match self.pattern() {
            Pattern::Regex(re) => re.is_match(&path),
            Pattern::Literal(value) if value.is_empty() => true,
            Pattern::Literal(value) => match self.glob() {
                Some(glob) => glob.is_match(&path),
                None => path
                    .to_lowercase()
                    .contains(&normalize_folder_path(value).to_lowercase()),
            },
        }
    }
}

impl Filter {
    /// Returns true if the item matches the filter.
    ///
    /// Every field group must pass: at least one of its positive tags
    /// matches (when it has any), and every one of its negative tags
    /// excludes successfully. An empty filter matches everything.
    pub fn matches(&self, item: &Item) -> bool {
        self.groups().all(|group| {
            let mut positive = group.positive().peekable();
            let positive_ok =
                positive.peek().is_none() || positive.any(|tag| tag.matches(item));

            positive_ok && group.negative().all(|tag| tag.matches(item))
        })
    }

    /// Filters a slice of items, returning only those that match, in order.
    pub fn filter_items<'b>(&self, items: &'b [Item]) -> Vec<&'b Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Parses `filter` and returns the matching items, in input order.
///
/// A blank filter returns every item.
pub fn filter_items<'a>(filter: &str, items: &'a [Item]) -> Vec<&'a Item> {
    if filter.trim().is_empty() {
        return items.iter().collect();
    }
    FilterParser::parse(filter).filter_items(items)
}

/// Extracts the host name from a URL, or `None` if it has none.
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
