//! Browser history records and their conversion into [`Item`]s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::Item;

/// A visit-history entry as reported by the browser history API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Page title (may be missing for pages that never set one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page URL.
    pub url: String,

    /// Number of visits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,

    /// Last visit, in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_time: Option<f64>,
}

impl HistoryEntry {
    /// Returns the last visit as a UTC timestamp.
    pub fn last_visit(&self) -> Option<DateTime<Utc>> {
        self.last_visit_time
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
    }
}

impl From<HistoryEntry> for Item {
    fn from(entry: HistoryEntry) -> Self {
        let last_visit_time = entry.last_visit();
        let title = match entry.title {
            Some(title) if !title.is_empty() => title,
            _ => entry.url.clone(),
        };
        Item {
            title,
            url: entry.url,
            folder: None,
            last_visit_time,
            visit_count: entry.visit_count,
        }
    }
}

/// Converts history entries into items, most recently visited first.
///
/// Entries without a visit time sort after all timed entries; ties keep
/// their input order.
pub fn history_items(entries: Vec<HistoryEntry>) -> Vec<Item> {
    let mut items: Vec<Item> = entries.into_iter().map(Item::from).collect();
    items.sort_by(|a, b| b.last_visit_time.cmp(&a.last_visit_time));
    items
}
