//! Output formatting utilities for the tabdeck CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules:
//!
//! - [`check`] - Filter check output (summary, explained tags)
//! - [`items`] - Item lists and assembled cards
//! - [`helpers`] - Common formatting utilities (truncation, folders, visit times)

mod check;
pub mod helpers;
mod items;

pub use check::{format_check_json, format_check_table};
pub use items::{format_card_json, format_card_table, format_items_json, format_items_table};
