//! Card assembly: gathering a card's items from its sources.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tabdeck_model::models::{CardConfig, Item, SourceKind};
use tracing::debug;

use crate::filter::FilterParser;

/// Collects the items a card shows, in display order.
///
/// Bookmarks come first, then history. With a history window
/// (`history_days > 0`) only history visited inside it is kept, and
/// history without a visit time is dropped. Duplicate URLs keep their
/// first occurrence, so a bookmark wins over its history entry. The
/// card's filter is then applied and the result truncated to
/// `max_items`.
///
/// An invalid filter still collects: evaluation degrades to text matching.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use tabdeck_filter::collect_card_items;
/// use tabdeck_model::models::{CardConfig, Item, SourceKind};
///
/// let card = CardConfig::new("Work", vec![SourceKind::Bookmarks]).with_filter("dir:Work");
/// let bookmarks = vec![
///     Item::bookmark("Wiki", "https://wiki.example.com", "Work"),
///     Item::bookmark("Recipes", "https://food.example.com", "Home"),
/// ];
///
/// let items = collect_card_items(&card, &bookmarks, &[], Utc::now());
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].title, "Wiki");
/// ```
pub fn collect_card_items<'a>(
    card: &CardConfig,
    bookmarks: &'a [Item],
    history: &'a [Item],
    now: DateTime<Utc>,
) -> Vec<&'a Item> {
    let mut candidates: Vec<&'a Item> = Vec::new();

    if card.uses(SourceKind::Bookmarks) {
        candidates.extend(bookmarks.iter());
    }

    if card.uses(SourceKind::History) {
        let cutoff = history_cutoff(card.history_days, now);
        candidates.extend(history.iter().filter(|item| match cutoff {
            Some(cutoff) => item.last_visit_time.is_some_and(|t| t >= cutoff),
            None => true,
        }));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    candidates.retain(|&item| seen.insert(item.url.as_str()));

    let gathered = candidates.len();
    let mut items: Vec<&'a Item> = if card.filter.trim().is_empty() {
        candidates
    } else {
        let filter = FilterParser::parse(&card.filter);
        candidates.into_iter().filter(|item| filter.matches(item)).collect()
    };
    items.truncate(card.max_items);

    debug!(
        card = card.title.as_str(),
        gathered,
        shown = items.len(),
        "collected card items"
    );
    items
}

/// The oldest visit time a history item may have, if the card limits it.
///
/// A window reaching past the earliest representable time keeps all history.
fn history_cutoff(history_days: Option<u32>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match history_days {
        Some(days) if days > 0 => {
            Duration::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn visited(title: &str, url: &str, days_ago: i64) -> Item {
        let mut item = Item::new(title, url);
        item.last_visit_time = Some(now() - Duration::days(days_ago));
        item.visit_count = Some(1);
        item
    }

    fn titles(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_history_cutoff() {
        assert_eq!(history_cutoff(None, now()), None);
        assert_eq!(history_cutoff(Some(0), now()), None);
        assert_eq!(
            history_cutoff(Some(7), now()),
            Some(Utc.with_ymd_and_hms(2026, 3, 8, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_history_cutoff_out_of_range_window_is_unbounded() {
        assert_eq!(history_cutoff(Some(200_000_000), now()), None);
        assert_eq!(history_cutoff(Some(u32::MAX), now()), None);
    }

    #[test]
    fn test_huge_history_window_keeps_all_history() {
        let mut card = CardConfig::new("Everything", vec![SourceKind::History]);
        card.history_days = Some(u32::MAX);
        let history = vec![
            visited("Recent", "https://recent.test/", 1),
            visited("Ancient", "https://ancient.test/", 9_000),
        ];

        let items = collect_card_items(&card, &[], &history, now());
        assert_eq!(titles(&items), vec!["Recent", "Ancient"]);
    }

    #[test]
    fn test_bookmarks_come_before_history() {
        let card = CardConfig::new("All", vec![SourceKind::History, SourceKind::Bookmarks]);
        let bookmarks = vec![Item::bookmark("B", "https://b.test/", "Bar")];
        let history = vec![visited("H", "https://h.test/", 1)];

        let items = collect_card_items(&card, &bookmarks, &history, now());
        assert_eq!(titles(&items), vec!["B", "H"]);
    }

    #[test]
    fn test_unselected_source_is_skipped() {
        let card = CardConfig::new("History", vec![SourceKind::History]);
        let bookmarks = vec![Item::bookmark("B", "https://b.test/", "Bar")];
        let history = vec![visited("H", "https://h.test/", 1)];

        let items = collect_card_items(&card, &bookmarks, &history, now());
        assert_eq!(titles(&items), vec!["H"]);
    }

    #[test]
    fn test_history_window_drops_old_and_undated_visits() {
        let mut card = CardConfig::new("Recent", vec![SourceKind::History]);
        card.history_days = Some(3);
        let history = vec![
            visited("fresh", "https://a.test/", 1),
            visited("stale", "https://b.test/", 10),
            Item::new("undated", "https://c.test/"),
        ];

        let items = collect_card_items(&card, &[], &history, now());
        assert_eq!(titles(&items), vec!["fresh"]);
    }

    #[test]
    fn test_history_window_does_not_touch_bookmarks() {
        let mut card = CardConfig::new("Mixed", vec![SourceKind::Bookmarks, SourceKind::History]);
        card.history_days = Some(1);
        let bookmarks = vec![Item::bookmark("B", "https://b.test/", "Bar")];

        let items = collect_card_items(&card, &bookmarks, &[], now());
        assert_eq!(titles(&items), vec!["B"]);
    }

    #[test]
    fn test_duplicate_urls_keep_bookmark() {
        let card = CardConfig::new("Mixed", vec![SourceKind::Bookmarks, SourceKind::History]);
        let bookmarks = vec![Item::bookmark("Docs bookmark", "https://docs.test/", "Bar")];
        let history = vec![
            visited("Docs visit", "https://docs.test/", 1),
            visited("Other", "https://other.test/", 2),
            visited("Other again", "https://other.test/", 3),
        ];

        let items = collect_card_items(&card, &bookmarks, &history, now());
        assert_eq!(titles(&items), vec!["Docs bookmark", "Other"]);
    }

    #[test]
    fn test_filter_then_truncate() {
        let mut card = CardConfig::new("Rust", vec![SourceKind::History]).with_filter("rust");
        card.max_items = 2;
        let history = vec![
            visited("rust 1", "https://a.test/", 1),
            visited("go", "https://b.test/", 1),
            visited("rust 2", "https://c.test/", 1),
            visited("rust 3", "https://d.test/", 1),
        ];

        let items = collect_card_items(&card, &[], &history, now());
        assert_eq!(titles(&items), vec!["rust 1", "rust 2"]);
    }

    #[test]
    fn test_zero_max_items_shows_nothing() {
        let mut card = CardConfig::new("Empty", vec![SourceKind::History]);
        card.max_items = 0;
        let history = vec![visited("a", "https://a.test/", 1)];

        assert!(collect_card_items(&card, &[], &history, now()).is_empty());
    }

    #[test]
    fn test_dir_filter_keeps_history_in_mixed_card() {
        let card = CardConfig::new("Work", vec![SourceKind::Bookmarks, SourceKind::History])
            .with_filter("dir:Work");
        let bookmarks = vec![
            Item::bookmark("Wiki", "https://wiki.test/", "Work"),
            Item::bookmark("Recipes", "https://food.test/", "Home"),
        ];
        let history = vec![visited("Visited", "https://v.test/", 1)];

        let items = collect_card_items(&card, &bookmarks, &history, now());
        assert_eq!(titles(&items), vec!["Wiki", "Visited"]);
    }

    #[test]
    fn test_invalid_filter_still_collects() {
        let card = CardConfig::new("Broken", vec![SourceKind::History]).with_filter("title:/[/");
        let history = vec![
            visited("has /[/ in it", "https://a.test/", 1),
            visited("plain", "https://b.test/", 1),
        ];

        let items = collect_card_items(&card, &[], &history, now());
        assert_eq!(titles(&items), vec!["has /[/ in it"]);
    }
}
