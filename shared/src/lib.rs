//! Shared types for the Bistro backend
//!
//! Domain models, canonical enumerations, error codes and the reservation
//! admission rule, used by the server and mirrored by the website frontend.

pub mod error;
pub mod models;
pub mod reservation;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
