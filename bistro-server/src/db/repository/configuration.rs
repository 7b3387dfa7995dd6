//! Configuration Repository (Singleton)

use super::{RepoError, RepoResult, to_u32};
use chrono::NaiveDate;
use shared::models::{Configuration, DayHours};
use sqlx::SqlitePool;
use sqlx::types::Json;

const SINGLETON_ID: i64 = 1;

#[derive(Debug, sqlx::FromRow)]
struct ConfigurationRow {
    opening_hours: Json<Vec<DayHours>>,
    reservation_interval_minutes: i64,
    min_duration_minutes: i64,
    max_duration_minutes: i64,
    capacity: i64,
    holidays: Json<Vec<NaiveDate>>,
    announcement: String,
    updated_at: i64,
}

impl TryFrom<ConfigurationRow> for Configuration {
    type Error = RepoError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            opening_hours: row.opening_hours.0,
            reservation_interval_minutes: to_u32(
                row.reservation_interval_minutes,
                "reservation_interval_minutes",
            )?,
            min_duration_minutes: to_u32(row.min_duration_minutes, "min_duration_minutes")?,
            max_duration_minutes: to_u32(row.max_duration_minutes, "max_duration_minutes")?,
            capacity: to_u32(row.capacity, "capacity")?,
            holidays: row.holidays.0,
            announcement: row.announcement,
            updated_at: Some(row.updated_at),
        })
    }
}

pub async fn get(pool: &SqlitePool) -> RepoResult<Option<Configuration>> {
    let row = sqlx::query_as::<_, ConfigurationRow>(
        "SELECT opening_hours, reservation_interval_minutes, min_duration_minutes, max_duration_minutes, \
         capacity, holidays, announcement, updated_at FROM configuration WHERE id = ?",
    )
    .bind(SINGLETON_ID)
    .fetch_optional(pool)
    .await?;
    row.map(Configuration::try_from).transpose()
}

/// Read the singleton, inserting the defaults first when it does not exist
///
/// `INSERT OR IGNORE` keeps concurrent first reads from racing each other.
pub async fn get_or_create(pool: &SqlitePool, default_capacity: u32) -> RepoResult<Configuration> {
    if let Some(config) = get(pool).await? {
        return Ok(config);
    }

    let defaults = Configuration::with_capacity(default_capacity);
    sqlx::query(
        "INSERT OR IGNORE INTO configuration (id, opening_hours, reservation_interval_minutes, \
         min_duration_minutes, max_duration_minutes, capacity, holidays, announcement, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(SINGLETON_ID)
    .bind(Json(&defaults.opening_hours))
    .bind(defaults.reservation_interval_minutes)
    .bind(defaults.min_duration_minutes)
    .bind(defaults.max_duration_minutes)
    .bind(defaults.capacity)
    .bind(Json(&defaults.holidays))
    .bind(&defaults.announcement)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;

    get(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create configuration".into()))
}

/// Replace the whole record (upsert on the singleton id)
pub async fn replace(pool: &SqlitePool, config: &Configuration) -> RepoResult<Configuration> {
    sqlx::query(
        "INSERT INTO configuration (id, opening_hours, reservation_interval_minutes, \
         min_duration_minutes, max_duration_minutes, capacity, holidays, announcement, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
         ON CONFLICT(id) DO UPDATE SET opening_hours = excluded.opening_hours, \
         reservation_interval_minutes = excluded.reservation_interval_minutes, \
         min_duration_minutes = excluded.min_duration_minutes, \
         max_duration_minutes = excluded.max_duration_minutes, \
         capacity = excluded.capacity, holidays = excluded.holidays, \
         announcement = excluded.announcement, updated_at = excluded.updated_at",
    )
    .bind(SINGLETON_ID)
    .bind(Json(&config.opening_hours))
    .bind(config.reservation_interval_minutes)
    .bind(config.min_duration_minutes)
    .bind(config.max_duration_minutes)
    .bind(config.capacity)
    .bind(Json(&config.holidays))
    .bind(&config.announcement)
    .bind(shared::util::now_millis())
    .execute(pool)
    .await?;

    get(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to read configuration after update".into()))
}
