//! sqlexport core - Date normalization for SQL exports
//!
//! Rows fetched from a database carry dates in many shapes: formatted text,
//! integer or fractional Unix timestamps, or structured calendar dates. This
//! crate turns each of them into one canonical `YYYY/MM/DD` string and holds
//! the configuration of an export run.
//!
//! # Quick Start
//!
//! ```
//! use sqlexport_core::{DateNormalizer, NormalizeError, RawDateValue};
//! use serde_json::json;
//!
//! let normalizer = DateNormalizer::new();
//!
//! let date = normalizer.normalize(&RawDateValue::from("04.02.1992")).unwrap();
//! assert_eq!(date.as_str(), "1992/04/02");
//!
//! // Epoch values take their calendar date in UTC unless an offset is given
//! let date = normalizer.normalize(&RawDateValue::from(1_535_516_087.322_354)).unwrap();
//! assert_eq!(date.as_str(), "2018/08/29");
//!
//! let err = normalizer.normalize_value(&json!(null)).unwrap_err();
//! assert!(matches!(err, NormalizeError::UnsupportedType { .. }));
//! ```

pub mod config;
pub mod config_loader;
pub mod error;
pub mod normalize;
pub mod scenarios;

pub use config::{DatabaseDriver, Delimiters, ExportConfig, LoggingConfig};
pub use config_loader::{load_config, load_config_with_paths, ConfigLoader};
pub use error::{NormalizeError, Result, SqlExportError};
pub use normalize::{
    normalize_date, parse_text_date, CanonicalDate, DateNormalizer, RawDateKind, RawDateValue,
};
pub use scenarios::{
    reference_normalizer, reference_scenarios, Expected, ReferenceScenario, ScenarioInput,
    REFERENCE_EPOCH_OFFSET_SECONDS,
};

/// Re-export commonly used types
pub use chrono::{FixedOffset, NaiveDate};
