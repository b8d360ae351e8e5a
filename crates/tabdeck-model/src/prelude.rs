//! Convenience re-exports for common tabdeck types.
//!
//! ```
//! use tabdeck_model::prelude::*;
//!
//! let item = Item::new("Rust", "https://www.rust-lang.org/");
//! assert!(!item.is_bookmark());
//! ```

pub use crate::models::{
    flatten_bookmarks, history_items, BookmarkNode, CardConfig, HistoryEntry, Item, SourceKind,
    BOOKMARK_ROOT_FOLDER,
};
