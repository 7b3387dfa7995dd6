//! Data models
//!
//! Shared between bistro-server and the website frontend (via API).
//! JSON is camelCase. Enumerations derive `sqlx::Type` behind the `db`
//! feature so the same type validates input and decodes rows.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod configuration;
pub mod menu;
pub mod user;
pub mod wine;

// Re-exports
pub use category::*;
pub use configuration::*;
pub use menu::*;
pub use user::*;
pub use wine::*;
