//! Record types consumed by the filter engine.
//!
//! Items come from two browser sources: the bookmark tree (flattened so
//! every bookmark carries its folder path) and the visit history.

mod bookmark;
mod card;
mod history;
mod item;

pub use bookmark::*;
pub use card::*;
pub use history::*;
pub use item::*;
