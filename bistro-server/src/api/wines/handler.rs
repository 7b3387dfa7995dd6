//! Wine API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Wine, WineCreate, WineUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::catalog;
use crate::utils::AppJson;

/// GET /api/wines - all wines with their variants
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Wine>>> {
    let wines = catalog::list_wines(&state.pool).await?;
    Ok(Json(wines))
}

/// GET /api/wines/{name}
pub async fn get_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Wine>> {
    let wine = catalog::get_wine_by_name(&state.pool, &name).await?;
    Ok(Json(wine))
}

/// POST /api/admin/wines
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(payload): AppJson<WineCreate>,
) -> AppResult<(StatusCode, Json<Wine>)> {
    let wine = catalog::create_wine(&state.pool, payload).await?;
    tracing::debug!(operator = %user.username, wine_id = wine.id, "create wine");
    Ok((StatusCode::CREATED, Json(wine)))
}

/// PUT /api/admin/wines/{id} - full replace, variants included
pub async fn replace(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<WineCreate>,
) -> AppResult<Json<Wine>> {
    let wine = catalog::replace_wine(&state.pool, id, payload).await?;
    tracing::debug!(operator = %user.username, wine_id = id, "replace wine");
    Ok(Json(wine))
}

/// PATCH /api/admin/wines/{id} - supplied fields only
pub async fn patch(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<WineUpdate>,
) -> AppResult<Json<Wine>> {
    let wine = catalog::patch_wine(&state.pool, id, payload).await?;
    tracing::debug!(operator = %user.username, wine_id = id, "patch wine");
    Ok(Json(wine))
}

/// DELETE /api/admin/wines/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    catalog::delete_wine(&state.pool, id).await?;
    tracing::debug!(operator = %user.username, wine_id = id, "delete wine");
    Ok(ApiResponse::ok())
}
