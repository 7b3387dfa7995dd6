//! Configuration API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/configuration", get(handler::get))
}

/// Relative to `/api/admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new().route(
        "/configuration",
        put(handler::replace).layer(middleware::from_fn(require_permission(
            permissions::SETTINGS_MANAGE,
        ))),
    )
}
