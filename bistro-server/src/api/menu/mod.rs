//! Menu item and drink API
//!
//! Both resources share one handler set; the section is attached to each
//! router as an `Extension`.

mod handler;

use axum::{
    Extension, Router, middleware,
    routing::{get, post, put},
};
use shared::models::MenuSection;

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/menu-items", routes(MenuSection::Food))
        .nest("/api/drinks", routes(MenuSection::Drink))
}

/// Relative to `/api/admin`
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .nest("/menu-items", admin_routes(MenuSection::Food))
        .nest("/drinks", admin_routes(MenuSection::Drink))
}

fn routes(section: MenuSection) -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .layer(Extension(section))
}

fn admin_routes(section: MenuSection) -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            permissions::CATALOG_MANAGE,
        )))
        .layer(Extension(section))
}
