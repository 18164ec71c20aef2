//! UTC day bucketing for Unix timestamps.
//!
//! All arithmetic is done on whole seconds in UTC; the host timezone never
//! enters into it.

use chrono::{NaiveDate, NaiveTime};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Unix timestamp of 00:00:00 UTC on the day containing `timestamp`.
///
/// Pre-epoch values round down to their own day boundary. Idempotent.
///
/// The earliest representable midnight is `i64::MIN + 55_808`; earlier
/// inputs, whose day boundary lies below `i64::MIN`, clamp to `i64::MIN`,
/// which is not itself a midnight.
pub fn day_start(timestamp: i64) -> i64 {
    timestamp.saturating_sub(timestamp.rem_euclid(SECONDS_PER_DAY))
}

/// Unix timestamp of midnight UTC at the start of `date`.
pub fn date_start(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
