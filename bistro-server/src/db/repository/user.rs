//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{Role, User};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Stored account, password hash included (never serialized)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: i64,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            role: record.role,
            is_active: record.is_active,
            created_at: record.created_at,
        }
    }
}

const COLUMNS: &str = "id, username, password_hash, role, is_active, created_at";

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<UserRecord>> {
    let record = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {COLUMNS} FROM app_user WHERE username = ? LIMIT 1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let record = sqlx::query_as::<_, UserRecord>(&format!("SELECT {COLUMNS} FROM app_user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record.map(User::from))
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO app_user (username, password_hash, role, is_active, created_at) VALUES (?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
