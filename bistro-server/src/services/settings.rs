//! Restaurant configuration (singleton)

use std::collections::HashSet;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Configuration, ConfigurationUpdate};
use sqlx::SqlitePool;

use crate::db::repository::configuration;
use crate::utils::validation::MAX_DESCRIPTION_LEN;

/// Read the configuration, creating it with defaults on first read
pub async fn get_configuration(pool: &SqlitePool, default_capacity: u32) -> AppResult<Configuration> {
    Ok(configuration::get_or_create(pool, default_capacity).await?)
}

/// Validate and replace the whole record
pub async fn replace_configuration(
    pool: &SqlitePool,
    data: ConfigurationUpdate,
) -> AppResult<Configuration> {
    let mut config = Configuration::from(data);
    validate_configuration(&config)?;

    config.opening_hours.sort_by_key(|h| h.weekday);
    config.holidays.sort();
    config.holidays.dedup();

    let saved = configuration::replace(pool, &config).await?;
    tracing::info!(
        open_days = saved.opening_hours.len(),
        holidays = saved.holidays.len(),
        capacity = saved.capacity,
        "Configuration replaced"
    );
    Ok(saved)
}

pub fn validate_configuration(config: &Configuration) -> AppResult<()> {
    let mut weekdays = HashSet::new();
    for (i, hours) in config.opening_hours.iter().enumerate() {
        let field = format!("openingHours[{i}]");
        if hours.weekday > 6 {
            return Err(invalid(
                &field,
                format!("weekday must be 0 (Sunday) to 6 (Saturday), got {}", hours.weekday),
            ));
        }
        if !weekdays.insert(hours.weekday) {
            return Err(invalid(&field, format!("weekday {} is listed twice", hours.weekday)));
        }
        if hours.open >= hours.close {
            return Err(invalid(&field, "opening time must be before closing time"));
        }
    }

    if config.reservation_interval_minutes == 0 {
        return Err(invalid(
            "reservationIntervalMinutes",
            "reservation interval must be positive",
        ));
    }
    if config.min_duration_minutes == 0 {
        return Err(invalid("minDurationMinutes", "minimum duration must be positive"));
    }
    if config.min_duration_minutes > config.max_duration_minutes {
        return Err(invalid(
            "maxDurationMinutes",
            "maximum duration must not be below the minimum",
        ));
    }
    if config.capacity == 0 {
        return Err(invalid("capacity", "capacity must be positive"));
    }
    if config.announcement.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(invalid(
            "announcement",
            format!("announcement is too long (max {MAX_DESCRIPTION_LEN})"),
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::ConfigurationInvalid, message).with_detail("field", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use shared::models::DayHours;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_configuration(&Configuration::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_hours() {
        let mut config = Configuration::default();
        config.opening_hours.push(DayHours {
            weekday: 7,
            open: at(12, 0),
            close: at(14, 0),
        });
        let err = validate_configuration(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationInvalid);

        let mut config = Configuration::default();
        config.opening_hours[0].close = at(11, 0);
        assert!(validate_configuration(&config).is_err());

        let mut config = Configuration::default();
        let first = config.opening_hours[0];
        config.opening_hours.push(first);
        let err = validate_configuration(&config).unwrap_err();
        assert!(err.message.contains("twice"));
    }

    #[test]
    fn test_rejects_bad_policy() {
        let config = Configuration {
            reservation_interval_minutes: 0,
            ..Configuration::default()
        };
        assert!(validate_configuration(&config).is_err());

        let config = Configuration {
            min_duration_minutes: 200,
            max_duration_minutes: 120,
            ..Configuration::default()
        };
        let err = validate_configuration(&config).unwrap_err();
        assert_eq!(err.details.unwrap()["field"], "maxDurationMinutes");

        let config = Configuration {
            capacity: 0,
            ..Configuration::default()
        };
        assert!(validate_configuration(&config).is_err());
    }

    #[test]
    fn test_all_week_closed_is_valid() {
        let config = Configuration {
            opening_hours: vec![],
            ..Configuration::default()
        };
        assert!(validate_configuration(&config).is_ok());
    }
}
