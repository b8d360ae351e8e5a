//! Card configuration: which sources a card draws from and how it filters.

use serde::{Deserialize, Serialize};

/// Default number of items shown on a card.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// A data source a card can draw items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The flattened bookmark tree.
    Bookmarks,
    /// The visit history.
    History,
}

/// Configuration of a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    /// Card heading.
    #[serde(default)]
    pub title: String,

    /// Sources to gather items from, in order.
    #[serde(default)]
    pub sources: Vec<SourceKind>,

    /// Filter expression applied to the gathered items.
    #[serde(default)]
    pub filter: String,

    /// Maximum number of items to keep.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Only keep history visited within this many days (0 or absent: no limit).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_days: Option<u32>,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

impl CardConfig {
    /// Creates a card drawing from the given sources with no filter.
    pub fn new(title: impl Into<String>, sources: Vec<SourceKind>) -> Self {
        Self {
            title: title.into(),
            sources,
            filter: String::new(),
            max_items: DEFAULT_MAX_ITEMS,
            history_days: None,
        }
    }

    /// Sets the filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Returns true if the card draws from the given source.
    pub fn uses(&self, source: SourceKind) -> bool {
        self.sources.contains(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_defaults_from_json() {
        let card: CardConfig =
            serde_json::from_str(r#"{"title": "Work", "sources": ["bookmarks"]}"#).unwrap();
        assert_eq!(card.max_items, DEFAULT_MAX_ITEMS);
        assert!(card.history_days.is_none());
        assert!(card.uses(SourceKind::Bookmarks));
        assert!(!card.uses(SourceKind::History));
    }

    #[test]
    fn test_card_camel_case_fields() {
        let card: CardConfig = serde_json::from_str(
            r#"{"title": "Recent", "sources": ["history"], "filter": "domain:*.rs",
                "maxItems": 5, "historyDays": 7}"#,
        )
        .unwrap();
        assert_eq!(card.max_items, 5);
        assert_eq!(card.history_days, Some(7));
        assert_eq!(card.filter, "domain:*.rs");
    }
}
