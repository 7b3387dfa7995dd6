//! Migration runner
//!
//! Migrations are embedded at compile time from `bistro-server/migrations`
//! as `up`/`down` pairs; `_sqlx_migrations` records the applied versions.

use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// State of one known migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Apply every pending migration
pub async fn run(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Revert applied migrations down to `target` (0 reverts everything)
pub async fn undo(pool: &SqlitePool, target: i64) -> Result<(), MigrateError> {
    MIGRATOR.undo(pool, target).await
}

/// Known migrations with their applied flag, oldest first
pub async fn status(pool: &SqlitePool) -> Result<Vec<MigrationStatus>, sqlx::Error> {
    let ledger_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await?;

    let applied: Vec<i64> = if ledger_exists {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success = 1")
            .fetch_all(pool)
            .await?
    } else {
        Vec::new()
    };

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Highest applied version, 0 on a fresh database
pub async fn current_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    Ok(status(pool)
        .await?
        .iter()
        .filter(|m| m.applied)
        .map(|m| m.version)
        .max()
        .unwrap_or(0))
}
