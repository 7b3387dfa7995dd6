//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryKind};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, kind, sort_order FROM category ORDER BY sort_order, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, kind, sort_order FROM category WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM category WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    kind: CategoryKind,
    sort_order: i32,
) -> RepoResult<Category> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO category (name, kind, sort_order) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(kind)
    .bind(sort_order)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    kind: Option<CategoryKind>,
    sort_order: Option<i32>,
) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), kind = COALESCE(?2, kind), sort_order = COALESCE(?3, sort_order) WHERE id = ?4",
    )
    .bind(name)
    .bind(kind)
    .bind(sort_order)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category; referencing rows keep existing with `category_id = NULL`
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(true)
}
