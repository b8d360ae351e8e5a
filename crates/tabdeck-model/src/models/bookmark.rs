//! Browser bookmark trees and their flattening into [`Item`]s.

use serde::{Deserialize, Serialize};

use super::item::{Item, BOOKMARK_ROOT_FOLDER};

/// Separator placed between folder names in a flattened folder path.
pub const FOLDER_SEPARATOR: &str = " > ";

/// A node of a browser bookmark tree.
///
/// Folders have `children`; bookmarks have a `url`. This is the shape
/// returned by the browser bookmarks API and found in bookmark exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkNode {
    /// Folder or bookmark title.
    #[serde(default)]
    pub title: String,

    /// Bookmark URL (absent for folders).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Child nodes (present for folders, possibly empty).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    /// Creates a folder node.
    pub fn folder(title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            title: title.into(),
            url: None,
            children: Some(children),
        }
    }

    /// Creates a bookmark node.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            children: None,
        }
    }
}

/// Flattens bookmark trees into items, depth-first and in tree order.
///
/// Each bookmark's `folder` is the path of folder titles leading to it,
/// joined with ` > `. Bookmarks at the top level get
/// [`BOOKMARK_ROOT_FOLDER`]. Untitled folders do not contribute a segment
/// when they are the first one, so the browser's untitled root node can be
/// passed in directly.
///
/// # Example
///
/// ```
/// use tabdeck_model::models::{flatten_bookmarks, BookmarkNode};
///
/// let tree = vec![BookmarkNode::folder(
///     "Work",
///     vec![BookmarkNode::link("Tracker", "https://tracker.example.com")],
/// )];
/// let items = flatten_bookmarks(&tree);
/// assert_eq!(items[0].folder.as_deref(), Some("Work"));
/// ```
pub fn flatten_bookmarks(nodes: &[BookmarkNode]) -> Vec<Item> {
    let mut items = Vec::new();
    collect_bookmarks(nodes, "", &mut items);
    items
}

fn collect_bookmarks(nodes: &[BookmarkNode], folder_path: &str, items: &mut Vec<Item>) {
    for node in nodes {
        if let Some(children) = &node.children {
            let current = if folder_path.is_empty() {
                node.title.clone()
            } else {
                format!("{folder_path}{FOLDER_SEPARATOR}{}", node.title)
            };
            collect_bookmarks(children, &current, items);
        } else if let Some(url) = &node.url {
            let folder = if folder_path.is_empty() {
                BOOKMARK_ROOT_FOLDER
            } else {
                folder_path
            };
            items.push(Item::bookmark(node.title.clone(), url.clone(), folder));
        }
    }
}
