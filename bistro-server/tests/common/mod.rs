//! Test harness: the full router over a private in-memory database

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use bistro_server::auth::permissions::permissions_for;
use bistro_server::db::DbService;
use bistro_server::{Config, ServerState, api};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::Role;
use tower::ServiceExt;

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config::for_database("sqlite::memory:");
        let db = DbService::new(&config.database_url)
            .await
            .expect("in-memory database");
        let state = ServerState::new(config, db.pool);
        let app = api::build_app(&state);
        Self { state, app }
    }

    /// Token signed by this app, no account row needed
    pub fn token(&self, role: Role) -> String {
        let username = match role {
            Role::Admin => "admin",
            Role::Editor => "editor",
        };
        self.state
            .get_jwt_service()
            .generate_token(1, username, role, permissions_for(role))
            .expect("token")
    }

    pub fn admin_token(&self) -> String {
        self.token(Role::Admin)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.admin_token();
        self.request(method, uri, body, Some(&token)).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .expect("count")
    }
}
