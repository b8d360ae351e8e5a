//! Common helper functions for output formatting.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabdeck_model::models::{Item, BOOKMARK_ROOT_FOLDER};

/// How root-level bookmarks show their folder.
const ROOT_FOLDER_LABEL: &str = "(root)";

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a visit time relative to `now`.
///
/// Within a week this is `just now`, `5m ago`, `3h ago` or `2d ago`;
/// older visits show their date.
pub fn format_time_ago(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(time);
    let minutes = elapsed.num_minutes();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}

/// Formats a bookmark folder for display.
pub fn format_folder(folder: &str) -> &str {
    if folder == BOOKMARK_ROOT_FOLDER {
        ROOT_FOLDER_LABEL
    } else {
        folder
    }
}

/// Formats the detail column: the folder for bookmarks, visit stats for
/// history entries.
pub fn format_item_detail(item: &Item, now: DateTime<Utc>) -> String {
    if let Some(folder) = item.folder_path() {
        return format_folder(folder).to_string();
    }

    let visits = item.visit_count.map(|count| match count {
        1 => "1 visit".to_string(),
        n => format!("{n} visits"),
    });
    let when = item.last_visit_time.map(|t| format_time_ago(t, now));

    match (visits, when) {
        (Some(visits), Some(when)) => format!("{visits} · {when}"),
        (Some(visits), None) => visits,
        (None, Some(when)) => when,
        (None, None) => String::new(),
    }
}

/// Colors a table header when colors are enabled.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        header.dimmed().to_string()
    } else {
        header.to_string()
    }
}
