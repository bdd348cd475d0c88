//! Unix epoch to calendar date conversion
//!
//! Instants are read as UTC. The calendar date is taken at a fixed offset,
//! UTC unless the caller chooses another.

use crate::error::NormalizeError;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// 0001-01-01T00:00:00Z
pub const MIN_EPOCH_SECONDS: i64 = -62_135_596_800;

/// 9999-12-31T23:59:59Z
pub const MAX_EPOCH_SECONDS: i64 = 253_402_300_799;

/// Convert whole seconds since the Unix epoch to the UTC calendar date
///
/// # Errors
/// Returns `NormalizeError::OutOfRange` when the instant falls outside years 1..=9999
pub fn epoch_seconds_to_date(seconds: i64) -> Result<NaiveDate, NormalizeError> {
    epoch_seconds_to_date_at(seconds, Utc.fix())
}

/// Convert whole seconds since the Unix epoch to the calendar date at `offset`
///
/// Near the ends of the range the local date can leave years 1..=9999; the
/// canonical formatter rejects those.
///
/// # Errors
/// Returns `NormalizeError::OutOfRange` when the instant falls outside years 1..=9999 UTC
pub fn epoch_seconds_to_date_at(
    seconds: i64,
    offset: FixedOffset,
) -> Result<NaiveDate, NormalizeError> {
    if !(MIN_EPOCH_SECONDS..=MAX_EPOCH_SECONDS).contains(&seconds) {
        return Err(NormalizeError::out_of_range(seconds));
    }
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|instant| instant.with_timezone(&offset).date_naive())
        .ok_or_else(|| NormalizeError::out_of_range(seconds))
}

/// Convert fractional seconds since the Unix epoch to the UTC calendar date
///
/// The value is floored to the second it falls in, so `-0.5` is still 1969-12-31.
///
/// # Errors
/// Returns `NormalizeError::OutOfRange` for NaN, infinities and instants outside years 1..=9999
pub fn float_epoch_to_date(seconds: f64) -> Result<NaiveDate, NormalizeError> {
    float_epoch_to_date_at(seconds, Utc.fix())
}

/// Convert fractional seconds since the Unix epoch to the calendar date at `offset`
///
/// # Errors
/// Returns `NormalizeError::OutOfRange` for NaN, infinities and instants outside years 1..=9999
pub fn float_epoch_to_date_at(
    seconds: f64,
    offset: FixedOffset,
) -> Result<NaiveDate, NormalizeError> {
    if !seconds.is_finite() {
        return Err(NormalizeError::out_of_range(seconds));
    }
    let whole = seconds.floor();
    if whole < MIN_EPOCH_SECONDS as f64 || whole > MAX_EPOCH_SECONDS as f64 {
        return Err(NormalizeError::out_of_range(seconds));
    }
    epoch_seconds_to_date_at(whole as i64, offset)
}
