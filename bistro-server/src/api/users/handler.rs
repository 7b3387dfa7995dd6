use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use shared::error::AppResult;
use shared::models::{Role, User, UserCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::services::accounts;
use crate::utils::AppJson;

/// POST /api/admin/users - new accounts default to the editor role
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let role = payload.role.unwrap_or(Role::Editor);
    let created =
        accounts::create_user(&state.pool, &payload.username, &payload.password, role).await?;
    security_log!(
        "INFO",
        "account_granted",
        user_id = created.id,
        granted_by = user.username.clone()
    );
    Ok((StatusCode::CREATED, Json(created)))
}
