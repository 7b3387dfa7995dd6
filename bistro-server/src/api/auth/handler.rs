//! Auth API Handlers

use axum::{Json, extract::State};
use shared::models::{LoginRequest, LoginResponse, User};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::accounts;
use crate::utils::AppJson;
use shared::error::AppResult;

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = accounts::login(&state.pool, state.get_jwt_service(), request).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<User>> {
    let user = accounts::current_user(&state.pool, &user).await?;
    Ok(Json(user))
}
