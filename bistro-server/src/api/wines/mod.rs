//! Wine API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wines", routes())
}

/// Relative to `/api/admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/wines", admin_routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{name}", get(handler::get_by_name))
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            put(handler::replace)
                .patch(handler::patch)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission(
            permissions::CATALOG_MANAGE,
        )))
}
