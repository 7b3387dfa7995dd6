//! Category service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, category};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

pub async fn list_categories(pool: &SqlitePool) -> AppResult<Vec<Category>> {
    Ok(category::find_all(pool).await?)
}

pub async fn create_category(pool: &SqlitePool, data: CategoryCreate) -> AppResult<Category> {
    let name = data.name.trim();
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    let kind = data.kind.ok_or_else(|| AppError::required("kind"))?;

    let created = category::create(pool, name, kind, data.sort_order.unwrap_or(0))
        .await
        .map_err(|e| map_write_error(e, name, None))?;
    tracing::info!(category_id = created.id, name = %created.name, "Category created");
    Ok(created)
}

pub async fn update_category(
    pool: &SqlitePool,
    id: i64,
    data: CategoryUpdate,
) -> AppResult<Category> {
    let name = data.name.as_deref().map(str::trim);
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let updated = category::update(pool, id, name, data.kind, data.sort_order)
        .await
        .map_err(|e| map_write_error(e, name.unwrap_or_default(), Some(id)))?;
    tracing::info!(category_id = id, "Category updated");
    Ok(updated)
}

/// Rows that referenced the category are kept with no category
pub async fn delete_category(pool: &SqlitePool, id: i64) -> AppResult<()> {
    category::delete(pool, id)
        .await
        .map_err(|e| map_write_error(e, "", Some(id)))?;
    tracing::info!(category_id = id, "Category deleted");
    Ok(())
}

fn map_write_error(err: RepoError, name: &str, id: Option<i64>) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::with_message(
            ErrorCode::CategoryNameExists,
            format!("A category named '{name}' already exists"),
        )
        .with_detail("field", "name"),
        RepoError::NotFound(msg) => {
            let err = AppError::with_message(ErrorCode::CategoryNotFound, msg);
            match id {
                Some(id) => err.with_detail("id", id),
                None => err,
            }
        }
        other => other.into(),
    }
}
