//! Bistro Server - restaurant catalog and reservation backend
//!
//! # Module layout
//!
//! ```text
//! bistro-server/src/
//! ├── core/          # configuration, shared state, HTTP server
//! ├── auth/          # JWT, permissions, password hashing, middleware
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── services/      # validation and business operations
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation helpers, JSON extractor
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event logging on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
