//! Category API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", Router::new().route("/", get(handler::list)))
}

/// Relative to `/api/admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/categories", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            permissions::CATALOG_MANAGE,
        )))
}
