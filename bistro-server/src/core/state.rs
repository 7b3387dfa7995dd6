//! Shared server state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::configuration;
use shared::error::AppError;

/// State shared by every handler
///
/// Cheap to clone: the pool and the services are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            pool,
            jwt_service,
        }
    }

    /// Open the database, apply pending migrations and seed the configuration row
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;
        configuration::get_or_create(&db.pool, config.default_capacity).await?;
        tracing::info!(database = %config.database_url, "Database ready");
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
