//! Permissive parsing of human-written date text
//!
//! The parser splits the text into words, drops time-of-day and zone noise,
//! and resolves the remaining numbers and month names into year, month and
//! day. All-numeric dates are read month first (`mm-dd-yyyy`) unless the
//! leading component is a year or cannot be a month. Two-digit years pivot
//! at 69 so that the result never depends on the current date.

use crate::error::NormalizeError;
use chrono::NaiveDate;
use sqlexport_common::{MAX_YEAR, MIN_YEAR, TWO_DIGIT_YEAR_PIVOT};

const MONTH_NAMES: &[(&str, u32)] = &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

const WEEKDAY_NAMES: &[&str] = &[
    "mon", "monday", "tue", "tues", "tuesday", "wed", "wednesday", "thu", "thur", "thurs",
    "thursday", "fri", "friday", "sat", "saturday", "sun", "sunday",
];

const FILLER_WORDS: &[&str] = &["at", "on", "of", "and"];

const ZONE_WORDS: &[&str] = &["am", "pm", "a.m.", "p.m.", "z", "utc", "gmt"];

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Digits(String),
    Month(u32),
}

#[derive(Debug, Clone, Copy)]
struct Component {
    value: u32,
    digits: usize,
}

impl Component {
    fn parse(input: &str, digits: &str) -> Result<Self, NormalizeError> {
        if digits.len() > 4 {
            return Err(NormalizeError::unparseable(
                input,
                format!("component '{digits}' is too long"),
            ));
        }
        let value = digits
            .parse()
            .map_err(|_| NormalizeError::unparseable(input, format!("bad number '{digits}'")))?;
        Ok(Self {
            value,
            digits: digits.len(),
        })
    }

    fn looks_like_year(self) -> bool {
        self.digits >= 3 || self.value > 31
    }

    fn as_year(self) -> i32 {
        let value = self.value as i32;
        if self.digits > 2 {
            value
        } else if self.value < TWO_DIGIT_YEAR_PIVOT {
            2000 + value
        } else {
            1900 + value
        }
    }
}

/// Parse date text into a calendar date
///
/// Accepts, among others, `04.02.1992`, `04-02-1992`, `1992/04/02`,
/// `19920402`, `April 2, 1992`, `2 Apr 92` and `2018-08-28T10:14:47Z`.
///
/// # Errors
/// Returns `NormalizeError::UnparseableDate` when the text does not resolve to
/// exactly one valid year, month and day
pub fn parse_text_date(input: &str) -> Result<NaiveDate, NormalizeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::unparseable(input, "empty input"));
    }

    let mut month_name = None;
    let mut numbers = Vec::new();
    for token in tokenize(input, trimmed)? {
        match token {
            Token::Month(month) => {
                if month_name.replace(month).is_some() {
                    return Err(NormalizeError::unparseable(
                        input,
                        "more than one month name",
                    ));
                }
            }
            Token::Digits(digits) => numbers.push(digits),
        }
    }

    let (year, month, day) = match month_name {
        Some(month) => resolve_with_month_name(input, month, &numbers)?,
        None => resolve_numeric(input, &numbers)?,
    };
    build_date(input, year, month, day)
}

fn tokenize(input: &str, trimmed: &str) -> Result<Vec<Token>, NormalizeError> {
    let text = split_date_from_time(&trimmed.to_lowercase()).replace(',', " ");
    let mut tokens = Vec::new();
    let mut seen_time = false;

    for word in text.split_whitespace() {
        if word.contains(':') {
            seen_time = true;
            continue;
        }
        if ZONE_WORDS.contains(&word) || word.starts_with('+') {
            continue;
        }
        if seen_time && is_zone_offset(word) {
            continue;
        }
        for piece in word.split(['.', '-', '/']).filter(|piece| !piece.is_empty()) {
            if let Some(token) = classify(input, piece)? {
                tokens.push(token);
            }
        }
    }
    Ok(tokens)
}

/// Replace a `t` sitting between two digits with a space (`1992-04-02t10:00`)
fn split_date_from_time(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if c == 't' && between_digits {
                ' '
            } else {
                c
            }
        })
        .collect()
}

fn is_zone_offset(word: &str) -> bool {
    word.strip_prefix('-').is_some_and(|rest| {
        matches!(rest.len(), 2 | 4) && rest.chars().all(|c| c.is_ascii_digit())
    })
}

fn classify(input: &str, piece: &str) -> Result<Option<Token>, NormalizeError> {
    if piece.chars().all(|c| c.is_ascii_digit()) {
        return Ok(Some(Token::Digits(piece.to_string())));
    }
    for suffix in ORDINAL_SUFFIXES {
        if let Some(number) = piece.strip_suffix(suffix) {
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                return Ok(Some(Token::Digits(number.to_string())));
            }
        }
    }
    if let Some((_, month)) = MONTH_NAMES.iter().find(|(name, _)| *name == piece) {
        return Ok(Some(Token::Month(*month)));
    }
    if WEEKDAY_NAMES.contains(&piece) || FILLER_WORDS.contains(&piece) {
        return Ok(None);
    }
    Err(NormalizeError::unparseable(
        input,
        format!("unrecognized word '{piece}'"),
    ))
}

fn resolve_numeric(input: &str, numbers: &[String]) -> Result<(i32, u32, u32), NormalizeError> {
    match numbers {
        [compact] => resolve_compact(input, compact),
        [first, second, third] => {
            let first = Component::parse(input, first)?;
            let second = Component::parse(input, second)?;
            let third = Component::parse(input, third)?;

            if first.looks_like_year() {
                if second.value > 12 && third.value <= 12 {
                    return Ok((first.as_year(), third.value, second.value));
                }
                return Ok((first.as_year(), second.value, third.value));
            }
            if second.digits >= 3 {
                return Err(NormalizeError::unparseable(
                    input,
                    "year in the middle of the date",
                ));
            }
            if first.value <= 12 {
                Ok((third.as_year(), first.value, second.value))
            } else if second.value <= 12 {
                Ok((third.as_year(), second.value, first.value))
            } else {
                Err(NormalizeError::unparseable(
                    input,
                    "no component can be the month",
                ))
            }
        }
        [] => Err(NormalizeError::unparseable(input, "no date components")),
        _ => Err(NormalizeError::unparseable(
            input,
            format!(
                "expected year, month and day, found {} numbers",
                numbers.len()
            ),
        )),
    }
}

fn resolve_compact(input: &str, digits: &str) -> Result<(i32, u32, u32), NormalizeError> {
    let field = |range: std::ops::Range<usize>| Component::parse(input, &digits[range]);
    match digits.len() {
        8 | 12 | 14 => Ok((field(0..4)?.as_year(), field(4..6)?.value, field(6..8)?.value)),
        6 => Ok((field(0..2)?.as_year(), field(2..4)?.value, field(4..6)?.value)),
        n => Err(NormalizeError::unparseable(
            input,
            format!("cannot read a {n}-digit number as a date"),
        )),
    }
}

fn resolve_with_month_name(
    input: &str,
    month: u32,
    numbers: &[String],
) -> Result<(i32, u32, u32), NormalizeError> {
    let [first, second] = numbers else {
        return Err(NormalizeError::unparseable(
            input,
            "expected a day and a year next to the month name",
        ));
    };
    let first = Component::parse(input, first)?;
    let second = Component::parse(input, second)?;

    match (first.looks_like_year(), second.looks_like_year()) {
        (true, true) => Err(NormalizeError::unparseable(input, "two years given")),
        (true, false) => Ok((first.as_year(), month, second.value)),
        (false, _) => Ok((second.as_year(), month, first.value)),
    }
}

fn build_date(input: &str, year: i32, month: u32, day: u32) -> Result<NaiveDate, NormalizeError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(NormalizeError::unparseable(
            input,
            format!("year {year} is out of range"),
        ));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        NormalizeError::unparseable(
            input,
            format!("no such date: year {year}, month {month}, day {day}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_parses(input: &str, expected: NaiveDate) {
        assert_eq!(parse_text_date(input).unwrap(), expected, "input: {input:?}");
    }

    fn assert_unparseable(input: &str) {
        assert!(
            matches!(
                parse_text_date(input),
                Err(NormalizeError::UnparseableDate { .. })
            ),
            "input: {input:?}"
        );
    }

    #[test]
    fn test_numeric_separators_read_month_first() {
        assert_parses("04.02.1992", ymd(1992, 4, 2));
        assert_parses("04-02-1992", ymd(1992, 4, 2));
        assert_parses("04/02/1992", ymd(1992, 4, 2));
        assert_parses("4/2/1992", ymd(1992, 4, 2));
    }

    #[test]
    fn test_day_first_when_month_impossible() {
        assert_parses("13.02.1992", ymd(1992, 2, 13));
        assert_parses("31/12/1999", ymd(1999, 12, 31));
    }

    #[test]
    fn test_year_first() {
        assert_parses("1992/04/02", ymd(1992, 4, 2));
        assert_parses("1992-04-02", ymd(1992, 4, 2));
        assert_parses("1992-25-04", ymd(1992, 4, 25));
    }

    #[test]
    fn test_compact_forms() {
        assert_parses("19920402", ymd(1992, 4, 2));
        assert_parses("920402", ymd(1992, 4, 2));
        assert_parses("20180828101447", ymd(2018, 8, 28));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_parses("04/02/92", ymd(1992, 4, 2));
        assert_parses("04/02/68", ymd(2068, 4, 2));
        assert_parses("04/02/69", ymd(1969, 4, 2));
        assert_parses("04/02/05", ymd(2005, 4, 2));
    }

    #[test]
    fn test_month_names() {
        assert_parses("April 2, 1992", ymd(1992, 4, 2));
        assert_parses("2 Apr 1992", ymd(1992, 4, 2));
        assert_parses("2 APR 92", ymd(1992, 4, 2));
        assert_parses("1992-Apr-02", ymd(1992, 4, 2));
        assert_parses("Sept 9 2001", ymd(2001, 9, 9));
        assert_parses("Feb 04 05", ymd(2005, 2, 4));
    }

    #[test]
    fn test_ordinals_weekdays_and_fillers() {
        assert_parses("Tuesday, 28th of August 2018", ymd(2018, 8, 28));
        assert_parses("on Mon. 1st Oct 2018", ymd(2018, 10, 1));
    }

    #[test]
    fn test_time_and_zone_are_ignored() {
        assert_parses("2018-08-28T10:14:47Z", ymd(2018, 8, 28));
        assert_parses("2018-08-28T23:59:59+02:00", ymd(2018, 8, 28));
        assert_parses("2018-08-28 10:14:47.322354", ymd(2018, 8, 28));
        assert_parses("Tue, 28 Aug 2018 10:14:47 +0000", ymd(2018, 8, 28));
        assert_parses("08/28/2018 10:14 PM", ymd(2018, 8, 28));
        assert_parses("08/28/2018 10:14 -0500", ymd(2018, 8, 28));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_parses("  04.02.1992\n", ymd(1992, 4, 2));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_unparseable("not-a-date");
        assert_unparseable("");
        assert_unparseable("   ");
        assert_unparseable("hello world");
    }

    #[test]
    fn test_rejects_incomplete_dates() {
        assert_unparseable("04.02");
        assert_unparseable("April 1992");
        assert_unparseable("1992");
        assert_unparseable("1535516087");
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert_unparseable("02/30/2020");
        assert_unparseable("13/13/2020");
        assert_unparseable("2020-02-30");
        assert_unparseable("0000-01-01");
    }

    #[test]
    fn test_rejects_conflicting_components() {
        assert_unparseable("April May 2 1992");
        assert_unparseable("1992 April 2001");
        assert_unparseable("04 1992 02");
        assert_unparseable("04.02.19920");
    }

    #[test]
    fn test_leap_day() {
        assert_parses("02/29/2020", ymd(2020, 2, 29));
        assert_unparseable("02/29/2019");
    }

    #[test]
    fn test_error_keeps_original_input() {
        match parse_text_date("not-a-date") {
            Err(NormalizeError::UnparseableDate { input, reason }) => {
                assert_eq!(input, "not-a-date");
                assert!(reason.contains("not"));
            }
            other => panic!("Expected UnparseableDate, got {other:?}"),
        }
    }
}
