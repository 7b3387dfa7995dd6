//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates access tokens
//! - [`CurrentUser`] is the authenticated caller
//! - [`require_auth`] / [`require_permission`] guard the admin routes
//! - [`password`] hashes and verifies passwords with Argon2

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
