//! Integration tests for assembling cards from bookmark and history sources.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tabdeck_filter::collect_card_items;
use tabdeck_model::models::{
    flatten_bookmarks, history_items, BookmarkNode, CardConfig, HistoryEntry, Item, SourceKind,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0).unwrap()
}

fn entry(title: &str, url: &str, days_ago: i64) -> HistoryEntry {
    HistoryEntry {
        title: Some(title.to_string()),
        url: url.to_string(),
        visit_count: Some(2),
        last_visit_time: Some((now() - Duration::days(days_ago)).timestamp_millis() as f64),
    }
}

fn bookmarks() -> Vec<Item> {
    flatten_bookmarks(&[
        BookmarkNode::link("Inbox", "https://mail.example.com/"),
        BookmarkNode::folder(
            "Work",
            vec![
                BookmarkNode::link("Tracker", "https://tracker.example.com/"),
                BookmarkNode::folder(
                    "Docs",
                    vec![BookmarkNode::link("API reference", "https://docs.example.com/api")],
                ),
            ],
        ),
    ])
}

fn history() -> Vec<Item> {
    history_items(vec![
        entry("Old tracker visit", "https://tracker.example.com/", 2),
        entry("Release blog", "https://blog.example.com/release", 1),
        entry("Ancient page", "https://ancient.example.com/", 40),
        entry("Docs search", "https://docs.example.com/search?q=api", 5),
    ])
}

fn titles(items: &[&Item]) -> Vec<String> {
    items.iter().map(|i| i.title.clone()).collect()
}

#[test]
fn test_card_config_from_json() {
    let card: CardConfig = serde_json::from_str(
        r#"{"title": "Recent work", "sources": ["bookmarks", "history"], "filter": "dir:Work/**", "historyDays": 7}"#,
    )
    .unwrap();

    assert_eq!(card.max_items, 100);
    assert_eq!(card.history_days, Some(7));
    assert!(card.uses(SourceKind::Bookmarks));
    assert!(card.uses(SourceKind::History));
}

#[test]
fn test_mixed_card_end_to_end() {
    let bookmarks = bookmarks();
    let history = history();
    let mut card = CardConfig::new("Work", vec![SourceKind::Bookmarks, SourceKind::History])
        .with_filter("dir:'Work/**' dir:Work");
    card.history_days = Some(7);

    let items = collect_card_items(&card, &bookmarks, &history, now());
    assert_eq!(
        titles(&items),
        vec!["Tracker", "API reference", "Release blog", "Docs search"]
    );
}

#[test]
fn test_history_card_most_recent_first() {
    let history = history();
    let card = CardConfig::new("History", vec![SourceKind::History]);

    let items = collect_card_items(&card, &[], &history, now());
    assert_eq!(
        titles(&items),
        vec!["Release blog", "Old tracker visit", "Docs search", "Ancient page"]
    );
}

#[test]
fn test_domain_card_with_limit() {
    let bookmarks = bookmarks();
    let history = history();
    let mut card = CardConfig::new("Docs", vec![SourceKind::Bookmarks, SourceKind::History])
        .with_filter("domain:docs.example.com domain:blog.example.com");
    card.max_items = 2;

    let items = collect_card_items(&card, &bookmarks, &history, now());
    assert_eq!(titles(&items), vec!["API reference", "Release blog"]);
}

#[test]
fn test_root_bookmarks_are_bookmarks() {
    let bookmarks = bookmarks();
    let card = CardConfig::new("Not work", vec![SourceKind::Bookmarks]).with_filter("-dir:'Work/**' -dir:Work");

    let items = collect_card_items(&card, &bookmarks, &[], now());
    assert_eq!(titles(&items), vec!["Inbox"]);
    assert!(items[0].is_root_bookmark());
}
