//! Data types shared by the tabdeck filter engine and CLI.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use tabdeck_model::prelude::*;
//! ```
//!
//! This re-exports [`Item`](models::Item), the bookmark and history source records, and
//! [`CardConfig`](models::CardConfig).

pub mod models;
pub mod prelude;
