//! Reservation admission rule
//!
//! Decides whether a proposed reservation can be accepted against the
//! [`Configuration`] singleton. The weekday rule and the holiday rule are
//! independent necessary conditions: a date is accepted only when neither
//! rejects it, and every failing rule is reported (weekday first).
//!
//! The functions here are pure and never fail for a well-formed date.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::configuration::{Configuration, DayHours, hhmm};

/// Proposed reservation (never persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub date: NaiveDate,
    #[serde(default, with = "hhmm::option")]
    pub time: Option<NaiveTime>,
    pub party_size: Option<u32>,
    pub duration_minutes: Option<u32>,
}

impl ReservationRequest {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            party_size: None,
            duration_minutes: None,
        }
    }
}

/// Machine-readable rejection reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCode {
    ClosedWeekday,
    Holiday,
    OutsideOpeningHours,
    OffInterval,
    PartySize,
    Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: RejectionCode,
    pub message: String,
}

/// Outcome of the admission rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub accepted: bool,
    /// Localized, human-readable summary
    pub reason: String,
    pub rejections: Vec<Rejection>,
}

const ACCEPTED_REASON: &str = "Réservation possible.";

impl Admission {
    fn from_rejections(rejections: Vec<Rejection>) -> Self {
        if rejections.is_empty() {
            return Self {
                accepted: true,
                reason: ACCEPTED_REASON.to_string(),
                rejections,
            };
        }
        let reason = rejections
            .iter()
            .map(|r| r.message.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            accepted: false,
            reason,
            rejections,
        }
    }

    pub fn has(&self, code: RejectionCode) -> bool {
        self.rejections.iter().any(|r| r.code == code)
    }
}

/// Check a bare date: weekday rule, then holiday rule
pub fn check_date(config: &Configuration, date: NaiveDate) -> Admission {
    Admission::from_rejections(date_rejections(config, date))
}

/// Check a full request: date rules plus time, party size and duration when supplied
pub fn check_request(config: &Configuration, request: &ReservationRequest) -> Admission {
    let mut rejections = date_rejections(config, request.date);

    if let Some(duration) = request.duration_minutes
        && !(config.min_duration_minutes..=config.max_duration_minutes).contains(&duration)
    {
        rejections.push(Rejection {
            code: RejectionCode::Duration,
            message: format!(
                "La durée doit être comprise entre {} et {} minutes.",
                config.min_duration_minutes, config.max_duration_minutes
            ),
        });
    }

    if let Some(size) = request.party_size
        && !(1..=config.capacity).contains(&size)
    {
        rejections.push(Rejection {
            code: RejectionCode::PartySize,
            message: format!(
                "Le nombre de couverts doit être compris entre 1 et {}.",
                config.capacity
            ),
        });
    }

    // Time checks only make sense on an open day
    if let (Some(time), Some(hours)) = (request.time, config.hours_for(request.date.weekday())) {
        let duration = request
            .duration_minutes
            .unwrap_or(config.min_duration_minutes);
        rejections.extend(time_rejections(config, hours, request.date.weekday(), time, duration));
    }

    Admission::from_rejections(rejections)
}

fn date_rejections(config: &Configuration, date: NaiveDate) -> Vec<Rejection> {
    let mut rejections = Vec::new();
    let weekday = date.weekday();

    if config.hours_for(weekday).is_none() {
        rejections.push(Rejection {
            code: RejectionCode::ClosedWeekday,
            message: format!("Le restaurant est fermé le {}.", day_name(weekday)),
        });
    }

    if config.is_holiday(date) {
        rejections.push(Rejection {
            code: RejectionCode::Holiday,
            message: format!(
                "Le restaurant est fermé le {} (jour férié).",
                date.format("%d/%m/%Y")
            ),
        });
    }

    rejections
}

fn time_rejections(
    config: &Configuration,
    hours: &DayHours,
    weekday: Weekday,
    time: NaiveTime,
    duration: u32,
) -> Vec<Rejection> {
    let mut rejections = Vec::new();
    let start = minutes_of_day(time);
    let open = minutes_of_day(hours.open);
    let close = minutes_of_day(hours.close);

    if start < open || start.saturating_add(duration) > close {
        rejections.push(Rejection {
            code: RejectionCode::OutsideOpeningHours,
            message: format!(
                "Le {} les réservations sont possibles de {} à {}, pour {} minutes à partir de {}.",
                day_name(weekday),
                hours.open.format("%H:%M"),
                hours.close.format("%H:%M"),
                duration,
                time.format("%H:%M"),
            ),
        });
    }

    let interval = config.reservation_interval_minutes.max(1);
    if time.second() != 0 || start.abs_diff(open) % interval != 0 {
        rejections.push(Rejection {
            code: RejectionCode::OffInterval,
            message: format!("Les réservations se font par tranches de {interval} minutes."),
        });
    }

    rejections
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lundi",
        Weekday::Tue => "mardi",
        Weekday::Wed => "mercredi",
        Weekday::Thu => "jeudi",
        Weekday::Fri => "vendredi",
        Weekday::Sat => "samedi",
        Weekday::Sun => "dimanche",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_week_sunday_to_thursday_accepted() {
        let config = Configuration::default();
        // 2026-10-18 is a Sunday
        let sunday = date(2026, 10, 18);
        for offset in 0..5 {
            let day = sunday + chrono::Days::new(offset);
            let admission = check_date(&config, day);
            assert!(admission.accepted, "{day} should be accepted");
            assert_eq!(admission.reason, "Réservation possible.");
            assert!(admission.rejections.is_empty());
        }
    }

    #[test]
    fn test_friday_and_saturday_rejected() {
        let config = Configuration::default();
        let friday = check_date(&config, date(2026, 10, 16));
        assert!(!friday.accepted);
        assert!(friday.has(RejectionCode::ClosedWeekday));
        assert_eq!(friday.reason, "Le restaurant est fermé le vendredi.");

        let saturday = check_date(&config, date(2026, 10, 17));
        assert!(!saturday.accepted);
        assert_eq!(saturday.reason, "Le restaurant est fermé le samedi.");
    }

    #[test]
    fn test_weekday_rule_holds_across_a_year() {
        let config = Configuration::default();
        let mut day = date(2026, 1, 1);
        while day.year() == 2026 {
            let closed = matches!(day.weekday(), Weekday::Fri | Weekday::Sat);
            assert_eq!(check_date(&config, day).accepted, !closed, "{day}");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_holiday_rejected_regardless_of_weekday() {
        let mut config = Configuration::default();
        // Thursday, otherwise open
        let christmas = date(2026, 12, 24);
        config.holidays.push(christmas);

        let admission = check_date(&config, christmas);
        assert!(!admission.accepted);
        assert_eq!(admission.rejections.len(), 1);
        assert!(admission.has(RejectionCode::Holiday));
        assert_eq!(
            admission.reason,
            "Le restaurant est fermé le 24/12/2026 (jour férié)."
        );
    }

    #[test]
    fn test_closed_weekday_and_holiday_both_reported() {
        let mut config = Configuration::default();
        // Friday
        let day = date(2026, 12, 25);
        config.holidays.push(day);

        let admission = check_date(&config, day);
        assert!(!admission.accepted);
        assert_eq!(admission.rejections.len(), 2);
        assert_eq!(admission.rejections[0].code, RejectionCode::ClosedWeekday);
        assert_eq!(admission.rejections[1].code, RejectionCode::Holiday);
    }

    #[test]
    fn test_configured_opening_days_drive_the_rule() {
        let mut config = Configuration::default();
        config.opening_hours.retain(|h| h.weekday != 1);
        config.opening_hours.push(DayHours {
            weekday: 5,
            open: time(18, 0),
            close: time(23, 30),
        });

        // Monday now closed, Friday open
        assert!(!check_date(&config, date(2026, 10, 19)).accepted);
        assert!(check_date(&config, date(2026, 10, 16)).accepted);
    }

    #[test]
    fn test_request_within_hours_accepted() {
        let config = Configuration::default();
        let request = ReservationRequest {
            date: date(2026, 10, 20),
            time: Some(time(20, 15)),
            party_size: Some(4),
            duration_minutes: Some(90),
        };
        let admission = check_request(&config, &request);
        assert!(admission.accepted, "{:?}", admission.rejections);
    }

    #[test]
    fn test_request_before_opening_rejected() {
        let config = Configuration::default();
        let mut request = ReservationRequest::for_date(date(2026, 10, 20));
        request.time = Some(time(11, 0));
        let admission = check_request(&config, &request);
        assert!(admission.has(RejectionCode::OutsideOpeningHours));
    }

    #[test]
    fn test_request_ending_after_close_rejected() {
        let config = Configuration::default();
        let mut request = ReservationRequest::for_date(date(2026, 10, 20));
        // default duration (60) ends at 23:15
        request.time = Some(time(22, 15));
        assert!(check_request(&config, &request).has(RejectionCode::OutsideOpeningHours));

        // last slot ending exactly at close is fine
        request.time = Some(time(22, 0));
        assert!(check_request(&config, &request).accepted);
    }

    #[test]
    fn test_request_off_interval_rejected() {
        let config = Configuration::default();
        let mut request = ReservationRequest::for_date(date(2026, 10, 20));
        request.time = Some(time(19, 10));
        let admission = check_request(&config, &request);
        assert!(!admission.accepted);
        assert!(admission.has(RejectionCode::OffInterval));
        assert!(!admission.has(RejectionCode::OutsideOpeningHours));
    }

    #[test]
    fn test_party_size_and_duration_bounds() {
        let config = Configuration::with_capacity(8);
        let mut request = ReservationRequest::for_date(date(2026, 10, 20));
        request.party_size = Some(9);
        request.duration_minutes = Some(30);
        let admission = check_request(&config, &request);
        assert!(admission.has(RejectionCode::PartySize));
        assert!(admission.has(RejectionCode::Duration));

        request.party_size = Some(0);
        assert!(check_request(&config, &request).has(RejectionCode::PartySize));

        request.party_size = Some(8);
        request.duration_minutes = Some(180);
        assert!(check_request(&config, &request).accepted);
    }

    #[test]
    fn test_oversized_duration_is_rejected_not_overflowed() {
        let config = Configuration::default();
        let mut request = ReservationRequest::for_date(date(2026, 10, 20));
        request.time = Some(time(19, 0));
        request.duration_minutes = Some(u32::MAX);
        let admission = check_request(&config, &request);
        assert!(!admission.accepted);
        assert!(admission.has(RejectionCode::Duration));
        assert!(admission.has(RejectionCode::OutsideOpeningHours));
    }

    #[test]
    fn test_time_ignored_on_closed_day() {
        let config = Configuration::default();
        let mut request = ReservationRequest::for_date(date(2026, 10, 16));
        request.time = Some(time(3, 7));
        let admission = check_request(&config, &request);
        assert_eq!(admission.rejections.len(), 1);
        assert!(admission.has(RejectionCode::ClosedWeekday));
    }

    #[test]
    fn test_request_json() {
        let request: ReservationRequest =
            serde_json::from_str(r#"{"date": "2026-10-20", "time": "19:30", "partySize": 2}"#)
                .unwrap();
        assert_eq!(request.time, Some(time(19, 30)));
        assert_eq!(request.party_size, Some(2));
        assert!(request.duration_minutes.is_none());

        let request: ReservationRequest = serde_json::from_str(r#"{"date": "2026-10-20"}"#).unwrap();
        assert!(request.time.is_none());
    }
}
