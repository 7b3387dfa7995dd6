//! Business operations
//!
//! Handlers and the CLI call these; they validate input, translate it into
//! repository drafts and map storage errors onto [`shared::ErrorCode`]s.

pub mod accounts;
pub mod catalog;
pub mod category;
pub mod menu;
pub mod quality;
pub mod reservation;
pub mod settings;
