//! Item and card output formatting.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabdeck_model::models::Item;

use super::helpers::{format_header, format_item_detail, truncate_str};

const TITLE_WIDTH: usize = 40;
const DETAIL_WIDTH: usize = 28;
const URL_WIDTH: usize = 60;

/// JSON output structure for the filter command.
#[derive(Serialize)]
pub struct ItemsListOutput<'a> {
    pub items: &'a [&'a Item],
    pub count: usize,
    /// Items that matched before `--limit` was applied.
    pub total: usize,
}

/// JSON output structure for the card command.
#[derive(Serialize)]
pub struct CardOutput<'a> {
    pub title: &'a str,
    pub filter: &'a str,
    pub description: &'a str,
    pub items: &'a [&'a Item],
    pub count: usize,
}

/// Formats filtered items as JSON.
pub fn format_items_json(items: &[&Item], total: usize) -> Result<String, serde_json::Error> {
    let output = ItemsListOutput {
        items,
        count: items.len(),
        total,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats items as a table.
pub fn format_items_table(items: &[&Item], now: DateTime<Utc>, use_colors: bool) -> String {
    if items.is_empty() {
        return "No matching items.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<TITLE_WIDTH$} {:<DETAIL_WIDTH$} {}",
        "Title", "Folder / Visits", "URL"
    );
    output.push_str(&format_header(&header, use_colors));
    output.push('\n');

    for item in items {
        let title = truncate_str(&item.title, TITLE_WIDTH);
        let detail = truncate_str(&format_item_detail(item, now), DETAIL_WIDTH);
        let url = truncate_str(&item.url, URL_WIDTH);
        let url = if use_colors {
            url.blue().to_string()
        } else {
            url
        };

        output.push_str(&format!(
            "{:<TITLE_WIDTH$} {:<DETAIL_WIDTH$} {}\n",
            title, detail, url
        ));
    }

    output
}

/// Formats an assembled card as JSON.
pub fn format_card_json(
    title: &str,
    filter: &str,
    description: &str,
    items: &[&Item],
) -> Result<String, serde_json::Error> {
    let output = CardOutput {
        title,
        filter,
        description,
        items,
        count: items.len(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats an assembled card as a heading followed by its item table.
pub fn format_card_table(
    title: &str,
    description: &str,
    items: &[&Item],
    now: DateTime<Utc>,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    let heading = format!("{title} ({})", items.len());
    if use_colors {
        output.push_str(&format!("{}\n", heading.green().bold()));
    } else {
        output.push_str(&heading);
        output.push('\n');
    }
    output.push_str(&format_header(description, use_colors));
    output.push_str("\n\n");
    output.push_str(&format_items_table(items, now, use_colors));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<Item> {
        let mut visit = Item::new("Forum", "https://users.rust-lang.org/");
        visit.visit_count = Some(2);
        visit.last_visit_time = Some(now() - Duration::minutes(10));
        vec![
            Item::bookmark("Rust Book", "https://doc.rust-lang.org/book/", "Bar > Rust"),
            visit,
        ]
    }

    #[test]
    fn test_items_table_empty() {
        assert_eq!(format_items_table(&[], now(), false), "No matching items.\n");
    }

    #[test]
    fn test_items_table_rows() {
        let items = sample();
        let refs: Vec<&Item> = items.iter().collect();
        let table = format_items_table(&refs, now(), false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Title"));
        assert!(lines[1].starts_with("Rust Book"));
        assert!(lines[1].contains("Bar > Rust"));
        assert!(lines[1].ends_with("https://doc.rust-lang.org/book/"));
        assert!(lines[2].contains("2 visits · 10m ago"));
    }

    #[test]
    fn test_items_json() {
        let items = sample();
        let refs: Vec<&Item> = items.iter().collect();
        let json: serde_json::Value =
            serde_json::from_str(&format_items_json(&refs[..1], 2).unwrap()).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["items"][0]["title"], "Rust Book");
        assert_eq!(json["items"][0]["folder"], "Bar > Rust");
    }

    #[test]
    fn test_card_json() {
        let items = sample();
        let refs: Vec<&Item> = items.iter().collect();
        let json: serde_json::Value = serde_json::from_str(
            &format_card_json("Rust", "url:rust", "url contains rust", &refs).unwrap(),
        )
        .unwrap();

        assert_eq!(json["title"], "Rust");
        assert_eq!(json["description"], "url contains rust");
        assert_eq!(json["count"], 2);
        assert_eq!(json["items"][1]["visitCount"], 2);
    }

    #[test]
    fn test_card_table_heading() {
        let items = sample();
        let refs: Vec<&Item> = items.iter().collect();
        let table = format_card_table("Rust", "url contains rust", &refs, now(), false);
        let mut lines = table.lines();

        assert_eq!(lines.next(), Some("Rust (2)"));
        assert_eq!(lines.next(), Some("url contains rust"));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().starts_with("Title"));
    }
}
