//! The flat item record every card is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder recorded for bookmarks that sit directly at the bookmark root.
///
/// Root bookmarks still need a non-empty folder so that `dir:` tags treat
/// them as bookmarks rather than history entries.
pub const BOOKMARK_ROOT_FOLDER: &str = "__BOOKMARK_ROOT__";

/// A bookmark or history entry.
///
/// Bookmarks carry a `folder` path (segments joined with ` > `); history
/// entries carry visit metadata instead. Absent fields behave as empty
/// strings or zero during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Page title.
    #[serde(default)]
    pub title: String,

    /// Page URL.
    #[serde(default)]
    pub url: String,

    /// Bookmark folder path, e.g. `Bookmarks Bar > Work > Docs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// Time of the most recent visit (history only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_time: Option<DateTime<Utc>>,

    /// Number of recorded visits (history only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_count: Option<u32>,
}

impl Item {
    /// Creates an item with just a title and URL.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            folder: None,
            last_visit_time: None,
            visit_count: None,
        }
    }

    /// Creates a bookmark item inside the given folder path.
    pub fn bookmark(
        title: impl Into<String>,
        url: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            folder: Some(folder.into()),
            ..Self::new(title, url)
        }
    }

    /// Returns true if the item carries a non-empty folder.
    pub fn is_bookmark(&self) -> bool {
        self.folder.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Returns the folder path, if the item is a bookmark.
    pub fn folder_path(&self) -> Option<&str> {
        self.folder.as_deref().filter(|f| !f.is_empty())
    }

    /// Returns true if the bookmark sits directly at the bookmark root.
    pub fn is_root_bookmark(&self) -> bool {
        self.folder.as_deref() == Some(BOOKMARK_ROOT_FOLDER)
    }
}
