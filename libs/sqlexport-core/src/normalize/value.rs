//! Conversions from untyped input into [`RawDateValue`]

use super::{parse_text_date, RawDateKind, RawDateValue};
use crate::error::NormalizeError;
use chrono::NaiveDate;
use serde_json::Value;
use std::num::IntErrorKind;

impl TryFrom<&Value> for RawDateValue {
    type Error = NormalizeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Number(number) => {
                if let Some(seconds) = number.as_i64() {
                    Ok(Self::IntegerEpoch(seconds))
                } else if number.is_u64() {
                    Err(NormalizeError::out_of_range(number))
                } else {
                    number
                        .as_f64()
                        .map(Self::FloatEpoch)
                        .ok_or_else(|| NormalizeError::out_of_range(number))
                }
            }
            Value::Null => Err(NormalizeError::UnsupportedType { kind: "null" }),
            Value::Bool(_) => Err(NormalizeError::UnsupportedType { kind: "boolean" }),
            Value::Array(_) => Err(NormalizeError::UnsupportedType { kind: "array" }),
            Value::Object(_) => Err(NormalizeError::UnsupportedType { kind: "object" }),
        }
    }
}

impl TryFrom<Value> for RawDateValue {
    type Error = NormalizeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            other => Self::try_from(&other),
        }
    }
}

impl RawDateValue {
    /// Guess the representation of command-line text
    ///
    /// Integers become epoch seconds, decimal or exponent numbers become
    /// fractional epoch seconds, and everything else stays text. A run of
    /// exactly 8 (`YYYYMMDD`) or 6 (`YYMMDD`) digits that forms a valid
    /// calendar date stays text; use [`RawDateValue::from_text_as`] with
    /// [`RawDateKind::Integer`] to read such a run as epoch seconds.
    #[must_use]
    pub fn infer(text: &str) -> Self {
        let trimmed = text.trim();
        if is_compact_date(trimmed) {
            return Self::Text(text.to_string());
        }
        if let Ok(seconds) = trimmed.parse::<i64>() {
            return Self::IntegerEpoch(seconds);
        }
        if trimmed.contains(['.', 'e', 'E']) {
            if let Ok(seconds) = trimmed.parse::<f64>() {
                if seconds.is_finite() {
                    return Self::FloatEpoch(seconds);
                }
            }
        }
        Self::Text(text.to_string())
    }

    /// Read text as an explicitly chosen representation
    ///
    /// # Errors
    /// Returns `UnparseableDate` when the text is not valid for `kind`, and
    /// `OutOfRange` for integers that do not fit in 64 bits
    pub fn from_text_as(kind: RawDateKind, text: &str) -> Result<Self, NormalizeError> {
        let trimmed = text.trim();
        match kind {
            RawDateKind::Text => Ok(Self::Text(text.to_string())),
            RawDateKind::Integer => match trimmed.parse::<i64>() {
                Ok(seconds) => Ok(Self::IntegerEpoch(seconds)),
                Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                    Err(NormalizeError::out_of_range(trimmed))
                }
                Err(e) => Err(NormalizeError::unparseable(
                    text,
                    format!("not an integer epoch: {e}"),
                )),
            },
            RawDateKind::Float => trimmed.parse::<f64>().map(Self::FloatEpoch).map_err(|e| {
                NormalizeError::unparseable(text, format!("not a float epoch: {e}"))
            }),
            RawDateKind::Calendar => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self::Calendar)
                .map_err(|e| {
                    NormalizeError::unparseable(text, format!("not a YYYY-MM-DD date: {e}"))
                }),
        }
    }
}

fn is_compact_date(text: &str) -> bool {
    matches!(text.len(), 6 | 8)
        && text.bytes().all(|b| b.is_ascii_digit())
        && parse_text_date(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_string_is_text() {
        let raw = RawDateValue::try_from(&json!("04.02.1992")).unwrap();
        assert_eq!(raw, RawDateValue::Text("04.02.1992".to_string()));
    }

    #[test]
    fn test_json_integer_is_epoch() {
        let raw = RawDateValue::try_from(&json!(1_535_516_087)).unwrap();
        assert_eq!(raw, RawDateValue::IntegerEpoch(1_535_516_087));
    }

    #[test]
    fn test_json_float_is_float_epoch() {
        let raw = RawDateValue::try_from(&json!(1_535_516_087.322_354)).unwrap();
        assert_eq!(raw, RawDateValue::FloatEpoch(1_535_516_087.322_354));
    }

    #[test]
    fn test_json_huge_unsigned_is_out_of_range() {
        let result = RawDateValue::try_from(&json!(u64::MAX));
        assert!(matches!(result, Err(NormalizeError::OutOfRange { .. })));
    }

    #[test]
    fn test_json_unsupported_kinds() {
        let cases = [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!([1, 2, 3]), "array"),
            (json!({"year": 1992}), "object"),
        ];
        for (value, expected) in cases {
            match RawDateValue::try_from(&value) {
                Err(NormalizeError::UnsupportedType { kind }) => assert_eq!(kind, expected),
                other => panic!("Expected UnsupportedType for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_owned_value_conversion() {
        let raw = RawDateValue::try_from(json!("1992/04/02")).unwrap();
        assert_eq!(raw.kind(), RawDateKind::Text);
        assert!(RawDateValue::try_from(json!(null)).is_err());
    }

    #[test]
    fn test_infer() {
        assert_eq!(RawDateValue::infer("1535516087"), RawDateValue::IntegerEpoch(1_535_516_087));
        assert_eq!(RawDateValue::infer(" -1 "), RawDateValue::IntegerEpoch(-1));
        assert_eq!(
            RawDateValue::infer("1535516087.322354"),
            RawDateValue::FloatEpoch(1_535_516_087.322_354)
        );
        assert_eq!(RawDateValue::infer("1.5e9"), RawDateValue::FloatEpoch(1.5e9));
        assert_eq!(RawDateValue::infer("04.02.1992").kind(), RawDateKind::Text);
        assert_eq!(RawDateValue::infer("Dec 1 2020").kind(), RawDateKind::Text);
        assert_eq!(RawDateValue::infer("1e999").kind(), RawDateKind::Text);
    }

    #[test]
    fn test_infer_keeps_compact_dates_as_text() {
        assert_eq!(
            RawDateValue::infer("19920402"),
            RawDateValue::Text("19920402".to_string())
        );
        assert_eq!(
            RawDateValue::infer(" 920402 "),
            RawDateValue::Text(" 920402 ".to_string())
        );
        // Not a calendar date, so still an epoch
        assert_eq!(RawDateValue::infer("99999999"), RawDateValue::IntegerEpoch(99_999_999));
        assert_eq!(RawDateValue::infer("123456"), RawDateValue::IntegerEpoch(123_456));
        // Other lengths are never compact dates
        assert_eq!(RawDateValue::infer("1992040"), RawDateValue::IntegerEpoch(1_992_040));
        assert_eq!(RawDateValue::infer("-19920402"), RawDateValue::IntegerEpoch(-19_920_402));
    }

    #[test]
    fn test_inferred_compact_date_normalizes() {
        let date = crate::normalize_date(&RawDateValue::infer("19920402")).unwrap();
        assert_eq!(date.as_str(), "1992/04/02");
    }

    #[test]
    fn test_from_text_as_text_keeps_compact_dates() {
        let raw = RawDateValue::from_text_as(RawDateKind::Text, "19920402").unwrap();
        assert_eq!(raw, RawDateValue::Text("19920402".to_string()));
    }

    #[test]
    fn test_from_text_as_numbers() {
        assert_eq!(
            RawDateValue::from_text_as(RawDateKind::Integer, "86400").unwrap(),
            RawDateValue::IntegerEpoch(86_400)
        );
        assert_eq!(
            RawDateValue::from_text_as(RawDateKind::Float, "86400").unwrap(),
            RawDateValue::FloatEpoch(86_400.0)
        );
        assert!(matches!(
            RawDateValue::from_text_as(RawDateKind::Integer, "abc"),
            Err(NormalizeError::UnparseableDate { .. })
        ));
        assert!(matches!(
            RawDateValue::from_text_as(RawDateKind::Integer, "99999999999999999999"),
            Err(NormalizeError::OutOfRange { .. })
        ));
        assert!(matches!(
            RawDateValue::from_text_as(RawDateKind::Float, "soon"),
            Err(NormalizeError::UnparseableDate { .. })
        ));
    }

    #[test]
    fn test_from_text_as_calendar() {
        assert_eq!(
            RawDateValue::from_text_as(RawDateKind::Calendar, "2018-08-28").unwrap(),
            RawDateValue::Calendar(NaiveDate::from_ymd_opt(2018, 8, 28).unwrap())
        );
        assert!(RawDateValue::from_text_as(RawDateKind::Calendar, "08/28/2018").is_err());
    }
}
