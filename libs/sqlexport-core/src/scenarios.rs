//! Reference normalization scenarios
//!
//! The pinned input/output pairs every build must reproduce. The CLI runs them
//! with `sqlexport self-test`; the test suites run them too.
//!
//! The recorded epoch outputs were produced five hours west of UTC, so those
//! scenarios run with [`reference_normalizer`]. Their UTC results are pinned
//! next to them.

use crate::error::NormalizeError;
use crate::normalize::{CanonicalDate, DateNormalizer, RawDateValue};
use chrono::{FixedOffset, NaiveDate};
use serde_json::{json, Value};

/// Input of a scenario: a typed value or an untyped one that goes through the JSON adapter
#[derive(Debug, Clone)]
pub enum ScenarioInput {
    Raw(RawDateValue),
    Dynamic(Value),
}

/// Expected outcome of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Canonical(&'static str),
    UnsupportedType,
    UnparseableDate,
    OutOfRange,
}

impl Expected {
    /// Whether a normalization result matches this outcome
    #[must_use]
    pub fn matches(&self, result: &Result<CanonicalDate, NormalizeError>) -> bool {
        match (self, result) {
            (Self::Canonical(text), Ok(date)) => date.as_str() == *text,
            (Self::UnsupportedType, Err(NormalizeError::UnsupportedType { .. }))
            | (Self::UnparseableDate, Err(NormalizeError::UnparseableDate { .. }))
            | (Self::OutOfRange, Err(NormalizeError::OutOfRange { .. })) => true,
            _ => false,
        }
    }
}

/// One pinned scenario
#[derive(Debug, Clone)]
pub struct ReferenceScenario {
    pub name: &'static str,
    pub input: ScenarioInput,
    pub normalizer: DateNormalizer,
    pub expected: Expected,
}

impl ReferenceScenario {
    /// Normalize the scenario input
    ///
    /// # Errors
    /// Returns the normalization error the input produces
    pub fn run(&self) -> Result<CanonicalDate, NormalizeError> {
        match &self.input {
            ScenarioInput::Raw(raw) => self.normalizer.normalize(raw),
            ScenarioInput::Dynamic(value) => self.normalizer.normalize_value(value),
        }
    }

    /// Run the scenario and compare with the expected outcome
    #[must_use]
    pub fn passes(&self) -> bool {
        self.expected.matches(&self.run())
    }
}

/// Offset, in seconds east of UTC, at which the reference epoch outputs were recorded
pub const REFERENCE_EPOCH_OFFSET_SECONDS: i32 = -5 * 3600;

/// Normalizer with the epoch offset of the recorded outputs
#[must_use]
pub fn reference_normalizer() -> DateNormalizer {
    FixedOffset::east_opt(REFERENCE_EPOCH_OFFSET_SECONDS)
        .map_or_else(DateNormalizer::new, DateNormalizer::with_epoch_offset)
}

/// The pinned scenarios, in a stable order
#[must_use]
pub fn reference_scenarios() -> Vec<ReferenceScenario> {
    let utc = DateNormalizer::new();
    let recorded = reference_normalizer();
    let reference_day = NaiveDate::from_ymd_opt(2018, 8, 28).unwrap_or_default();
    vec![
        ReferenceScenario {
            name: "dotted text date",
            input: ScenarioInput::Raw(RawDateValue::from("04.02.1992")),
            normalizer: utc,
            expected: Expected::Canonical("1992/04/02"),
        },
        ReferenceScenario {
            name: "integer epoch",
            input: ScenarioInput::Raw(RawDateValue::IntegerEpoch(1_535_516_087)),
            normalizer: recorded,
            expected: Expected::Canonical("2018/08/28"),
        },
        ReferenceScenario {
            name: "float epoch",
            input: ScenarioInput::Raw(RawDateValue::FloatEpoch(1_535_516_087.322_354)),
            normalizer: recorded,
            expected: Expected::Canonical("2018/08/28"),
        },
        ReferenceScenario {
            name: "integer epoch (UTC)",
            input: ScenarioInput::Raw(RawDateValue::IntegerEpoch(1_535_516_087)),
            normalizer: utc,
            expected: Expected::Canonical("2018/08/29"),
        },
        ReferenceScenario {
            name: "float epoch (UTC)",
            input: ScenarioInput::Raw(RawDateValue::FloatEpoch(1_535_516_087.322_354)),
            normalizer: utc,
            expected: Expected::Canonical("2018/08/29"),
        },
        ReferenceScenario {
            name: "calendar date",
            input: ScenarioInput::Raw(RawDateValue::Calendar(reference_day)),
            normalizer: recorded,
            expected: Expected::Canonical("2018/08/28"),
        },
        ReferenceScenario {
            name: "mapping is unsupported",
            input: ScenarioInput::Dynamic(json!({"date": "04.02.1992"})),
            normalizer: utc,
            expected: Expected::UnsupportedType,
        },
        ReferenceScenario {
            name: "garbage text",
            input: ScenarioInput::Raw(RawDateValue::from("not-a-date")),
            normalizer: utc,
            expected: Expected::UnparseableDate,
        },
        ReferenceScenario {
            name: "epoch beyond year 9999",
            input: ScenarioInput::Raw(RawDateValue::IntegerEpoch(i64::MAX)),
            normalizer: utc,
            expected: Expected::OutOfRange,
        },
    ]
}
