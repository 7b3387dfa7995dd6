//! Configuration Model (singleton)
//!
//! Opening hours, reservation policy and holidays. There is exactly one
//! configuration record; the server creates it with [`Configuration::with_capacity`]
//! on first read.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Capacity used when `DEFAULT_CAPACITY` is not set
pub const DEFAULT_CAPACITY: u32 = 40;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15;
pub const DEFAULT_MIN_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 180;

/// Opening window of one weekday (0 = Sunday ... 6 = Saturday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub weekday: u8,
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

/// Configuration singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Weekdays absent from this list are closed
    pub opening_hours: Vec<DayHours>,
    pub reservation_interval_minutes: u32,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    pub capacity: u32,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub announcement: String,
    pub updated_at: Option<i64>,
}

impl Configuration {
    /// Default configuration: Sunday to Thursday 12:00-23:00, Friday and
    /// Saturday closed, no holidays.
    pub fn with_capacity(capacity: u32) -> Self {
        let open = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        let close = NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default();
        Self {
            opening_hours: (0..=4)
                .map(|weekday| DayHours {
                    weekday,
                    open,
                    close,
                })
                .collect(),
            reservation_interval_minutes: DEFAULT_INTERVAL_MINUTES,
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            capacity,
            holidays: Vec::new(),
            announcement: String::new(),
            updated_at: None,
        }
    }

    /// Opening window for a weekday, `None` when closed
    pub fn hours_for(&self, weekday: Weekday) -> Option<&DayHours> {
        let n = weekday.num_days_from_sunday() as u8;
        self.opening_hours.iter().find(|h| h.weekday == n)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Replace-configuration payload (whole record, `updatedAt` is server-owned)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationUpdate {
    pub opening_hours: Vec<DayHours>,
    pub reservation_interval_minutes: u32,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    pub capacity: u32,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub announcement: String,
}

impl From<ConfigurationUpdate> for Configuration {
    fn from(u: ConfigurationUpdate) -> Self {
        Self {
            opening_hours: u.opening_hours,
            reservation_interval_minutes: u.reservation_interval_minutes,
            min_duration_minutes: u.min_duration_minutes,
            max_duration_minutes: u.max_duration_minutes,
            capacity: u.capacity,
            holidays: u.holidays,
            announcement: u.announcement,
            updated_at: None,
        }
    }
}

/// `HH:MM` time format; `HH:MM:SS` is also accepted on input
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
    }

    /// Same format for optional fields
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.collect_str(&t.format("%H:%M")),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
