//! sqlexport common - Shared constants and utilities
//!
//! # Examples
//!
//! ```
//! use sqlexport_common::{format_canonical, CANONICAL_DATE_FORMAT};
//! use chrono::NaiveDate;
//!
//! assert_eq!(CANONICAL_DATE_FORMAT, "%Y/%m/%d");
//!
//! let date = NaiveDate::from_ymd_opt(1992, 4, 2).unwrap();
//! assert_eq!(format_canonical(&date), "1992/04/02");
//! ```

pub mod constants;
pub mod utils;

pub use constants::*;
pub use utils::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_exported_constants() {
        assert_eq!(CANONICAL_DATE_FORMAT, "%Y/%m/%d");
        assert_eq!(DEFAULT_HOST, "localhost");
        assert_eq!(DEFAULT_OUTPUT_FILENAME, "output.csv");
        assert_eq!(ENV_SQL_HOST, "SQL_HOST");
    }

    #[test]
    fn test_re_exported_functions() {
        assert_eq!(parse_bool_flag("yes"), Some(true));
        assert_eq!(truncate_string("hello", 3), "...");
        assert!(!get_user_config_dir().to_string_lossy().is_empty());
    }
}
