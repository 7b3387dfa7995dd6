//! Configuration API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};
use shared::error::AppResult;
use shared::models::{Configuration, ConfigurationUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::services::settings;
use crate::utils::AppJson;

/// GET /api/configuration
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<Configuration>> {
    let config = settings::get_configuration(&state.pool, state.config.default_capacity).await?;
    Ok(Json(config))
}

/// PUT /api/admin/configuration - whole-record replace
pub async fn replace(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<ConfigurationUpdate>,
) -> AppResult<Json<Configuration>> {
    let config = settings::replace_configuration(&state.pool, payload).await?;
    security_log!(
        "INFO",
        "configuration_replaced",
        user_id = user.id,
        username = user.username.clone()
    );
    Ok(Json(config))
}
