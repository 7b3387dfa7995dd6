//! Back-office account API

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

/// Relative to `/api/admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest(
        "/users",
        Router::new()
            .route("/", post(handler::create))
            .layer(middleware::from_fn(require_permission(
                permissions::USERS_MANAGE,
            ))),
    )
}
