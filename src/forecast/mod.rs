//! Time-bucketed historical forecasting.
//!
//! Pure, stateless computation over a snapshot of a user's interval
//! readings: consumption for a requested instant (or a whole day) is
//! predicted from historical readings sharing the same weekday and
//! half-hour slot.

pub mod aggregate;
pub mod slot;

pub use aggregate::{aggregate_slot, SlotAggregate};
pub use slot::{round_up_to_slot, SlotKey, SLOTS_PER_DAY, SLOT_MINUTES};

use crate::error::{AppError, Result};
use crate::repositories::energy::EnergyReading;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Forecast for a single requested instant. The zero-sample case is a valid
/// forecast, not an error.
#[derive(Debug, Clone)]
pub struct PointForecast {
    pub requested_time: DateTime<Utc>,
    pub rounded_time: DateTime<Utc>,
    pub aggregate: SlotAggregate,
}

/// One non-empty half-hour slot of a day forecast.
#[derive(Debug, Clone)]
pub struct SlotForecast {
    pub time: DateTime<Utc>,
    pub aggregate: SlotAggregate,
}

/// Per-slot forecasts for one calendar day, ascending by time of day.
/// Slots without any matching history are omitted.
#[derive(Debug, Clone)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub day_of_week: i32,
    pub slots: Vec<SlotForecast>,
}

impl DayForecast {
    pub fn day_of_week_name(&self) -> &'static str {
        WEEKDAY_NAMES[self.day_of_week.rem_euclid(7) as usize]
    }
}

/// Parse an ISO-8601 instant. Accepts an RFC 3339 timestamp or a naive
/// date-time (with or without seconds), which is taken as UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(AppError::InvalidInput(format!("invalid timestamp: {value}")))
}

/// Parse an ISO-8601 calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("invalid date: {value}")))
}

/// Point forecast: round the instant up to its slot boundary, then average
/// all historical readings bucketed into the same (weekday, hour, minute)
/// slot. Always returns a forecast; with no matching history the aggregate
/// reports zero samples.
pub fn forecast_at(readings: &[EnergyReading], requested_time: DateTime<Utc>) -> PointForecast {
    let rounded_time = round_up_to_slot(requested_time);
    let key = SlotKey::for_instant(rounded_time);
    let aggregate = aggregate_slot(readings, key);

    PointForecast {
        requested_time,
        rounded_time,
        aggregate,
    }
}

/// Day forecast: walk all 48 half-hour slots of `date` in ascending order
/// and aggregate the history for each. Slots with no samples are dropped
/// from the result; present slots carry the target date combined with the
/// slot's time of day.
pub fn forecast_day(readings: &[EnergyReading], date: NaiveDate) -> DayForecast {
    let day_of_week = date.weekday().num_days_from_sunday() as i32;
    let midnight = date.and_time(NaiveTime::MIN).and_utc();

    let mut slots = Vec::new();
    for index in 0..SLOTS_PER_DAY {
        let time = midnight + Duration::minutes(index * SLOT_MINUTES);
        let key = SlotKey {
            day_of_week,
            hour: time.hour() as i32,
            minute: time.minute() as i32,
        };

        let aggregate = aggregate_slot(readings, key);
        if aggregate.sample_count == 0 {
            continue;
        }
        slots.push(SlotForecast { time, aggregate });
    }

    DayForecast {
        date,
        day_of_week,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn reading(start: &str, hour: i32, minute: i32, kwh: f64) -> EnergyReading {
        let start_time = utc(start);
        EnergyReading {
            start_time,
            end_time: start_time + Duration::minutes(30),
            kwh,
            hour,
            minute,
        }
    }

    /// Two Mondays of history at 14:00.
    fn two_mondays() -> Vec<EnergyReading> {
        vec![
            reading("2024-01-01T14:00:00Z", 14, 0, 0.40),
            reading("2024-01-08T14:00:00Z", 14, 0, 0.60),
        ]
    }

    #[test]
    fn test_parse_instant_variants() {
        assert_eq!(parse_instant("2024-01-15T14:00:00Z").unwrap(), utc("2024-01-15T14:00:00Z"));
        assert_eq!(
            parse_instant("2024-01-15T15:00:00+01:00").unwrap(),
            utc("2024-01-15T14:00:00Z")
        );
        assert_eq!(parse_instant("2024-01-15T14:00").unwrap(), utc("2024-01-15T14:00:00Z"));
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        let err = parse_instant("yesterday-ish").unwrap_err();
        assert!(err.to_string().contains("yesterday-ish"));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-01-15").is_ok());
        let err = parse_date("15/01/2024").unwrap_err();
        assert!(err.to_string().contains("15/01/2024"));
    }

    #[test]
    fn test_point_forecast_two_mondays() {
        // Requesting exactly 14:00 on a later Monday: on-boundary instants
        // round to themselves.
        let forecast = forecast_at(&two_mondays(), utc("2024-01-15T14:00:00Z"));

        assert_eq!(forecast.rounded_time, utc("2024-01-15T14:00:00Z"));
        assert_eq!(forecast.aggregate.sample_count, 2);
        assert_eq!(forecast.aggregate.average_kwh, 0.5);
        assert_eq!(forecast.aggregate.min_kwh, Some(0.4));
        assert_eq!(forecast.aggregate.max_kwh, Some(0.6));
    }

    #[test]
    fn test_point_forecast_rounds_off_boundary_requests() {
        // 14:10 rounds up to 14:30, where there is no history
        let forecast = forecast_at(&two_mondays(), utc("2024-01-15T14:10:00Z"));

        assert_eq!(forecast.requested_time, utc("2024-01-15T14:10:00Z"));
        assert_eq!(forecast.rounded_time, utc("2024-01-15T14:30:00Z"));
        assert_eq!(forecast.aggregate.sample_count, 0);
    }

    #[test]
    fn test_point_forecast_empty_history() {
        let forecast = forecast_at(&[], utc("2024-01-15T14:00:00Z"));
        assert_eq!(forecast.aggregate.sample_count, 0);
        assert_eq!(forecast.aggregate.average_kwh, 0.0);
    }

    #[test]
    fn test_day_forecast_omits_empty_slots() {
        // 2024-01-15 is a Monday; only the 14:00 slot has history
        let forecast = forecast_day(&two_mondays(), parse_date("2024-01-15").unwrap());

        assert_eq!(forecast.day_of_week, 1);
        assert_eq!(forecast.day_of_week_name(), "Monday");
        assert_eq!(forecast.slots.len(), 1);

        let slot = &forecast.slots[0];
        assert_eq!(slot.time, utc("2024-01-15T14:00:00Z"));
        assert_eq!(slot.aggregate.sample_count, 2);
        assert_eq!(slot.aggregate.average_kwh, 0.5);
    }

    #[test]
    fn test_day_forecast_other_weekday_sees_nothing() {
        // Same history, but asking about a Tuesday
        let forecast = forecast_day(&two_mondays(), parse_date("2024-01-16").unwrap());
        assert_eq!(forecast.day_of_week_name(), "Tuesday");
        assert!(forecast.slots.is_empty());
    }

    #[test]
    fn test_day_forecast_single_sample_slot() {
        let readings = vec![reading("2024-01-01T06:30:00Z", 6, 30, 1.25)];
        let forecast = forecast_day(&readings, parse_date("2024-01-15").unwrap());

        assert_eq!(forecast.slots.len(), 1);
        let agg = forecast.slots[0].aggregate;
        assert_eq!(agg.sample_count, 1);
        assert_eq!(agg.average_kwh, 1.25);
        assert_eq!(agg.min_kwh, Some(1.25));
        assert_eq!(agg.max_kwh, Some(1.25));
    }

    #[test]
    fn test_day_forecast_covers_at_most_48_unique_slots() {
        // One Monday's worth of readings for every half hour, plus a second
        // Monday duplicating them
        let mut readings = Vec::new();
        for day in ["2024-01-01", "2024-01-08"] {
            for half_hour in 0..SLOTS_PER_DAY {
                let start = utc(&format!("{day}T00:00:00Z")) + Duration::minutes(half_hour * 30);
                readings.push(reading(
                    &start.to_rfc3339(),
                    start.hour() as i32,
                    start.minute() as i32,
                    0.1,
                ));
            }
        }

        let forecast = forecast_day(&readings, parse_date("2024-01-15").unwrap());
        assert_eq!(forecast.slots.len(), 48);

        let mut seen = HashSet::new();
        for pair in forecast.slots.windows(2) {
            assert!(pair[0].time < pair[1].time, "slots must ascend");
        }
        for slot in &forecast.slots {
            assert!(seen.insert((slot.time.hour(), slot.time.minute())));
            assert_eq!(slot.aggregate.sample_count, 2);
        }
    }

    #[test]
    fn test_day_forecast_matches_weekday_from_timestamp_not_fields() {
        // Stored columns claim 10:00 but the timestamp is a Sunday evening;
        // the reading lands in (Sunday, 10, 0), never in any Monday slot.
        let readings = vec![reading("2024-01-14T21:00:00Z", 10, 0, 2.0)];

        let monday = forecast_day(&readings, parse_date("2024-01-15").unwrap());
        assert!(monday.slots.is_empty());

        let sunday = forecast_day(&readings, parse_date("2024-01-14").unwrap());
        assert_eq!(sunday.slots.len(), 1);
        assert_eq!(sunday.slots[0].time, utc("2024-01-14T10:00:00Z"));
    }
}
