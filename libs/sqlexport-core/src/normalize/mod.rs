//! Date normalization
//!
//! Turns one raw date value, in any of the representations a fetched row can
//! carry, into a single canonical `YYYY/MM/DD` string. Normalization is a pure
//! function: no shared state, no I/O, no logging. It is safe to call from any
//! number of threads at once.
//!
//! # Examples
//!
//! ```
//! use sqlexport_core::{normalize_date, RawDateValue};
//!
//! let date = normalize_date(&RawDateValue::from("04.02.1992")).unwrap();
//! assert_eq!(date.as_str(), "1992/04/02");
//!
//! // 2018-08-29T04:14:47Z
//! let date = normalize_date(&RawDateValue::from(1_535_516_087_i64)).unwrap();
//! assert_eq!(date.as_str(), "2018/08/29");
//! ```

mod epoch;
mod text_parser;
mod value;

pub use epoch::{
    epoch_seconds_to_date, epoch_seconds_to_date_at, float_epoch_to_date, float_epoch_to_date_at,
    MAX_EPOCH_SECONDS, MIN_EPOCH_SECONDS,
};
pub use text_parser::parse_text_date;

use crate::error::NormalizeError;
use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Serialize, Serializer};
use sqlexport_common::{format_canonical, MAX_YEAR, MIN_YEAR};
use std::fmt;

/// Raw date value as handed over by the data source
#[derive(Debug, Clone, PartialEq)]
pub enum RawDateValue {
    /// Human-readable date text, e.g. `"04.02.1992"`
    Text(String),
    /// Whole seconds since the Unix epoch (UTC)
    IntegerEpoch(i64),
    /// Fractional seconds since the Unix epoch (UTC)
    FloatEpoch(f64),
    /// Structured calendar date without a time of day
    Calendar(NaiveDate),
}

/// The representation a [`RawDateValue`] carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawDateKind {
    Text,
    Integer,
    Float,
    Calendar,
}

impl RawDateKind {
    /// Short lowercase name of the representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Calendar => "date",
        }
    }
}

impl fmt::Display for RawDateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RawDateValue {
    /// The representation of this value
    #[must_use]
    pub const fn kind(&self) -> RawDateKind {
        match self {
            Self::Text(_) => RawDateKind::Text,
            Self::IntegerEpoch(_) => RawDateKind::Integer,
            Self::FloatEpoch(_) => RawDateKind::Float,
            Self::Calendar(_) => RawDateKind::Calendar,
        }
    }
}

impl From<&str> for RawDateValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawDateValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for RawDateValue {
    fn from(seconds: i64) -> Self {
        Self::IntegerEpoch(seconds)
    }
}

impl From<i32> for RawDateValue {
    fn from(seconds: i32) -> Self {
        Self::IntegerEpoch(i64::from(seconds))
    }
}

impl From<u32> for RawDateValue {
    fn from(seconds: u32) -> Self {
        Self::IntegerEpoch(i64::from(seconds))
    }
}

impl From<f64> for RawDateValue {
    fn from(seconds: f64) -> Self {
        Self::FloatEpoch(seconds)
    }
}

impl From<NaiveDate> for RawDateValue {
    fn from(date: NaiveDate) -> Self {
        Self::Calendar(date)
    }
}

/// A date in the canonical `YYYY/MM/DD` layout
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalDate {
    date: NaiveDate,
    text: String,
}

impl CanonicalDate {
    /// Build a canonical date, rejecting years that do not fit four digits
    ///
    /// # Errors
    /// Returns `NormalizeError::OutOfRange` for years outside 1..=9999
    pub fn from_date(date: NaiveDate) -> Result<Self, NormalizeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(NormalizeError::out_of_range(date));
        }
        Ok(Self {
            date,
            text: format_canonical(&date),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// The calendar date behind the text
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CanonicalDate {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<CanonicalDate> for String {
    fn from(date: CanonicalDate) -> Self {
        date.text
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Normalize one raw date value into its canonical form
///
/// Epoch values take the UTC calendar date. Use
/// [`DateNormalizer::with_epoch_offset`] for another offset.
///
/// # Errors
/// - `UnparseableDate` when text cannot be resolved into year, month and day
/// - `OutOfRange` when an epoch or calendar value falls outside years 1..=9999
pub fn normalize_date(value: &RawDateValue) -> Result<CanonicalDate, NormalizeError> {
    DateNormalizer::new().normalize(value)
}

/// Date normalizer
///
/// Carries only the UTC offset at which epoch values take their calendar
/// date. It is `Copy` and holds no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    epoch_offset: FixedOffset,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DateNormalizer {
    /// Normalizer that reads epoch values in UTC
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch_offset: Utc.fix(),
        }
    }

    /// Normalizer that takes the calendar date of epoch values at `offset`
    ///
    /// Text and calendar values are unaffected.
    #[must_use]
    pub const fn with_epoch_offset(offset: FixedOffset) -> Self {
        Self {
            epoch_offset: offset,
        }
    }

    #[must_use]
    pub const fn epoch_offset(&self) -> FixedOffset {
        self.epoch_offset
    }

    /// Normalize a typed raw value
    ///
    /// # Errors
    /// See [`normalize_date`]
    pub fn normalize(&self, value: &RawDateValue) -> Result<CanonicalDate, NormalizeError> {
        let date = match value {
            RawDateValue::Text(text) => parse_text_date(text)?,
            RawDateValue::IntegerEpoch(seconds) => {
                epoch_seconds_to_date_at(*seconds, self.epoch_offset)?
            }
            RawDateValue::FloatEpoch(seconds) => {
                float_epoch_to_date_at(*seconds, self.epoch_offset)?
            }
            RawDateValue::Calendar(date) => *date,
        };
        CanonicalDate::from_date(date)
    }

    /// Normalize a dynamically typed value, such as a field of a JSON row
    ///
    /// # Errors
    /// Returns `UnsupportedType` for null, booleans, arrays and objects, and
    /// otherwise fails like [`normalize_date`]
    pub fn normalize_value(
        &self,
        value: &serde_json::Value,
    ) -> Result<CanonicalDate, NormalizeError> {
        let raw = RawDateValue::try_from(value)?;
        self.normalize(&raw)
    }
}
