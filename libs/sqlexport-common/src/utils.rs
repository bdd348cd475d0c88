//! Utility functions shared by the sqlexport crates

use crate::constants::CANONICAL_DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Format a date in the canonical `YYYY/MM/DD` layout
#[must_use]
pub fn format_canonical(date: &NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Parse a boolean flag value such as `true`, `1`, `yes`, `off`
///
/// Returns `None` for anything that is not a recognized flag value.
#[must_use]
pub fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` against `HOME`
///
/// Paths without the prefix, or with no `HOME` set, come back unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(rest),
            Err(_) => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Get the per-user configuration directory for sqlexport
#[must_use]
pub fn get_user_config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config").join("sqlexport")
    } else if let Ok(userprofile) = std::env::var("USERPROFILE") {
        PathBuf::from(userprofile)
            .join("AppData")
            .join("Roaming")
            .join("sqlexport")
    } else {
        PathBuf::from("~/.config/sqlexport")
    }
}

/// Truncate a string to at most `max_chars` characters, marking the cut with `...`
#[must_use]
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
