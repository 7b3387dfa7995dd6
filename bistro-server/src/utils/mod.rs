//! Utilities: logging setup, input validation helpers, JSON extractor

pub mod json;
pub mod logger;
pub mod validation;

pub use json::AppJson;
