//! Loading items from JSON exports.
//!
//! Three shapes are accepted:
//!
//! - item files: a JSON array of [`Item`]s
//! - bookmark exports: a bookmark tree, either one root node or an array
//! - history exports: a JSON array of [`HistoryEntry`] records

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tabdeck_model::models::{flatten_bookmarks, history_items, BookmarkNode, HistoryEntry, Item};
use tracing::debug;

use super::{CommandError, Result};

/// A bookmark export: the browser returns an array of roots, but a single
/// root node is common in hand-made exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum BookmarkExport {
    Roots(Vec<BookmarkNode>),
    Root(BookmarkNode),
}

/// Loads a JSON array of items.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let items: Vec<Item> = read_json(path)?;
    debug!(path = %path.display(), count = items.len(), "loaded items");
    Ok(items)
}

/// Loads a bookmark tree and flattens it into items in tree order.
pub fn load_bookmarks(path: &Path) -> Result<Vec<Item>> {
    let roots = match read_json(path)? {
        BookmarkExport::Roots(roots) => roots,
        BookmarkExport::Root(root) => vec![root],
    };
    let items = flatten_bookmarks(&roots);
    debug!(path = %path.display(), count = items.len(), "loaded bookmarks");
    Ok(items)
}

/// Loads history entries as items, most recent first.
pub fn load_history(path: &Path) -> Result<Vec<Item>> {
    let entries: Vec<HistoryEntry> = read_json(path)?;
    let items = history_items(entries);
    debug!(path = %path.display(), count = items.len(), "loaded history");
    Ok(items)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        CommandError::Source(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        CommandError::Source(format!("Failed to parse {}: {}", path.display(), e))
    })
}
