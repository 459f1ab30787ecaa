//! Timestamps and calendar normalization
//!
//! The engine works on integer seconds and never builds timestamps itself.
//! Producers that read calendar fields (day, month, year, clock time) turn
//! them into a [`Timestamp`] with [`timestamp_from_parts`], which reports an
//! invalid date as a [`TimestampError`] instead of silently guessing.

use chrono::NaiveDate;

use crate::errors::TimestampError;

/// Timestamp in whole seconds since the Unix epoch
pub type Timestamp = i64;

/// Sentinel a producer may substitute when a timestamp cannot be built.
///
/// Using it degrades slope accuracy around the affected sample; producers
/// that do so must count or log it.
pub const FALLBACK_TIMESTAMP: Timestamp = 0;

/// Build a timestamp from calendar fields
///
/// `month` is 1-based and `year` is the full year. Clock fields are read as
/// UTC wall time; fractional seconds are not part of the timestamp.
pub fn timestamp_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<Timestamp, TimestampError> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(TimestampError::InvalidDate { year, month, day })?;

    let datetime = date
        .and_hms_opt(hour, minute, second)
        .ok_or(TimestampError::InvalidTime { hour, minute, second })?;

    Ok(datetime.and_utc().timestamp())
}

/// Elapsed seconds between two timestamps, negative if time went backwards
pub fn elapsed_secs(earlier: Timestamp, later: Timestamp) -> i64 {
    later.saturating_sub(earlier)
}
