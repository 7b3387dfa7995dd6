//! Database Module
//!
//! SQLite connection pool and the embedded, reversible migrations.

pub mod migrate;
pub mod repository;

use shared::error::{AppError, ErrorCode};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service, owns the SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the database and apply pending migrations
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        let db = Self::connect(database_url).await?;
        migrate::run(&db.pool).await.map_err(|e| {
            AppError::with_message(ErrorCode::MigrationFailed, format!("Failed to apply migrations: {e}"))
        })?;
        tracing::info!("Database migrations applied");
        Ok(db)
    }

    /// Open the database without touching the schema
    ///
    /// An in-memory database lives as long as its single connection, so the
    /// pool is pinned to one connection that never expires.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        if !in_memory {
            // wait on write contention instead of failing immediately
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(&pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;
        }

        tracing::info!(in_memory, "Database connection established");
        Ok(Self { pool })
    }
}
