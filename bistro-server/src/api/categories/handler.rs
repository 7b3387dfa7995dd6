//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{ApiResponse, AppResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::core::ServerState;
use crate::services::category;
use crate::utils::AppJson;

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category::list_categories(&state.pool).await?))
}

/// POST /api/admin/categories
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let created = category::create_category(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/admin/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    Ok(Json(category::update_category(&state.pool, id, payload).await?))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    category::delete_category(&state.pool, id).await?;
    Ok(ApiResponse::ok())
}
