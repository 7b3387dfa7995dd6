//! Menu item and drink handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{MenuEntry, MenuEntryCreate, MenuEntryUpdate, MenuSection};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::menu;
use crate::utils::AppJson;

/// GET /api/menu-items, GET /api/drinks
pub async fn list(
    State(state): State<ServerState>,
    Extension(section): Extension<MenuSection>,
) -> AppResult<Json<Vec<MenuEntry>>> {
    let entries = menu::list_entries(&state.pool, section).await?;
    Ok(Json(entries))
}

/// POST /api/admin/menu-items, POST /api/admin/drinks
pub async fn create(
    State(state): State<ServerState>,
    Extension(section): Extension<MenuSection>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<MenuEntryCreate>,
) -> AppResult<(StatusCode, Json<MenuEntry>)> {
    let entry = menu::create_entry(&state.pool, section, payload).await?;
    tracing::debug!(operator = %user.username, id = entry.id, "create {}", section.label());
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/admin/{menu-items|drinks}/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Extension(section): Extension<MenuSection>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<MenuEntryUpdate>,
) -> AppResult<Json<MenuEntry>> {
    let entry = menu::update_entry(&state.pool, section, id, payload).await?;
    tracing::debug!(operator = %user.username, id, "update {}", section.label());
    Ok(Json(entry))
}

/// DELETE /api/admin/{menu-items|drinks}/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(section): Extension<MenuSection>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    menu::delete_entry(&state.pool, section, id).await?;
    tracing::debug!(operator = %user.username, id, "delete {}", section.label());
    Ok(ApiResponse::ok())
}
