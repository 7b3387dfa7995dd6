//! HTTP API
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - login and current user
//! - [`wines`] - wine list and wine administration
//! - [`menu`] - menu items and drinks
//! - [`categories`] - categories
//! - [`configuration`] - opening hours and reservation policy
//! - [`reservations`] - reservation admission check
//! - [`users`] - back-office accounts
//!
//! Public reads live under `/api`; writes live under `/api/admin` behind
//! [`require_auth`] plus a per-resource [`require_permission`](crate::auth::require_permission).

pub mod auth;
pub mod categories;
pub mod configuration;
pub mod health;
pub mod menu;
pub mod reservations;
pub mod users;
pub mod wines;

use std::time::Duration;

use axum::Router;
use axum::middleware;
use http::{HeaderName, HeaderValue, Method, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Public routes
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(wines::router())
        .merge(menu::router())
        .merge(categories::router())
        .merge(configuration::router())
        .merge(reservations::router())
}

/// Authenticated routes, mounted under `/api/admin`
pub fn build_admin_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(wines::admin_router())
        .merge(menu::admin_router())
        .merge(categories::admin_router())
        .merge(configuration::admin_router())
        .merge(users::admin_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// The complete application with its middleware stack
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .nest("/api/admin", build_admin_router(state))
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state.clone())
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
