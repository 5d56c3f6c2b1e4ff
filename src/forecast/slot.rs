use crate::repositories::energy::EnergyReading;
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Slot granularity in minutes. Two slots per hour, 48 per day.
pub const SLOT_MINUTES: i64 = 30;

/// Number of forecast slots in one calendar day.
pub const SLOTS_PER_DAY: i64 = 24 * 60 / SLOT_MINUTES;

/// Snap an instant up to the next slot boundary.
///
/// Minute 0 or 30 maps to itself (seconds and sub-seconds truncated);
/// 1..=29 advances to :30 of the same hour; 31..=59 advances to :00 of the
/// next hour, carrying day/month/year rollover. Idempotent.
pub fn round_up_to_slot(instant: DateTime<Utc>) -> DateTime<Utc> {
    let minute = instant.minute();
    let truncated = instant
        - Duration::seconds(i64::from(instant.second()))
        - Duration::nanoseconds(i64::from(instant.nanosecond()));

    match minute {
        0 | 30 => truncated,
        m if m < 30 => truncated + Duration::minutes(i64::from(30 - m)),
        m => truncated + Duration::minutes(i64::from(60 - m)),
    }
}

/// Canonical forecasting bucket: readings are grouped by weekday and
/// half-hour of day. Two readings share a slot iff all three components
/// match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i32,
    pub hour: i32,
    pub minute: i32,
}

impl SlotKey {
    /// Key for a stored reading. The weekday comes from `start_time` (the
    /// sole source of truth for the date), while hour and minute are taken
    /// from the reading's denormalized columns as stored. When the columns
    /// diverge from the timestamp the key mixes both sources; that matches
    /// how the data was bucketed at ingestion and is intentional.
    pub fn for_reading(reading: &EnergyReading) -> Self {
        Self {
            day_of_week: reading.start_time.weekday().num_days_from_sunday() as i32,
            hour: reading.hour,
            minute: reading.minute,
        }
    }

    /// Key for a request instant: all three components come from the
    /// instant's own clock fields. Callers round the instant first so the
    /// minute lands on a slot boundary.
    pub fn for_instant(instant: DateTime<Utc>) -> Self {
        Self {
            day_of_week: instant.weekday().num_days_from_sunday() as i32,
            hour: instant.hour() as i32,
            minute: instant.minute() as i32,
        }
    }
}
