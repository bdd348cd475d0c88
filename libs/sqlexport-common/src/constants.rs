//! Constants shared across the sqlexport crates

/// strftime layout of every canonical date (`YYYY/MM/DD`)
pub const CANONICAL_DATE_FORMAT: &str = "%Y/%m/%d";

/// Smallest year a canonical date can carry
pub const MIN_YEAR: i32 = 1;

/// Largest year a canonical date can carry
pub const MAX_YEAR: i32 = 9999;

/// Two-digit years below this value land in the 2000s, the rest in the 1900s
pub const TWO_DIGIT_YEAR_PIVOT: u32 = 69;

/// UTC offset at which epoch values take their calendar date
pub const DEFAULT_EPOCH_OFFSET: &str = "+00:00";

/// Longest input text repeated back in a parse error
pub const MAX_ECHOED_INPUT_CHARS: usize = 64;

/// Default database host
pub const DEFAULT_HOST: &str = "localhost";

/// Default export file name
pub const DEFAULT_OUTPUT_FILENAME: &str = "output.csv";

/// Default log level when logging is enabled
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Field break indicator
pub const DEFAULT_FIELD_DELIMITER: &str = ",";

/// Keeps text with spaces together inside a field
pub const DEFAULT_QUOTE_DELIMITER: &str = "\"";

/// Manual line break inside a field
pub const DEFAULT_NEWLINE_DELIMITER: &str = "\n";

/// Starts a new record; fixed by the load-file format
pub const RECORD_SEPARATOR: &str = "\r\n";

/// Environment variables read by the configuration layer
pub const ENV_SQL_HOST: &str = "SQL_HOST";
pub const ENV_SQL_PASSWORD: &str = "SQL_PASSWORD";
pub const ENV_SQL_DB: &str = "SQL_DB";
pub const ENV_DRIVER: &str = "SQLEXPORT_DRIVER";
pub const ENV_OUTPUT: &str = "SQLEXPORT_OUTPUT";
pub const ENV_LOGGING: &str = "SQLEXPORT_LOGGING";
pub const ENV_LOG_FILE: &str = "SQLEXPORT_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "SQLEXPORT_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "SQLEXPORT_LOG_JSON";
pub const ENV_EPOCH_OFFSET: &str = "SQLEXPORT_EPOCH_OFFSET";

/// Configuration file names searched in the working directory
pub const CONFIG_FILE_NAMES: &[&str] = &["sqlexport.yaml", "sqlexport.yml", "sqlexport.json"];

/// Log levels accepted by the configuration
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_date_format() {
        assert_eq!(CANONICAL_DATE_FORMAT, "%Y/%m/%d");
    }

    #[test]
    fn test_year_bounds() {
        assert!(MIN_YEAR < MAX_YEAR);
        assert_eq!(MAX_YEAR.to_string().len(), 4);
    }

    #[test]
    fn test_default_delimiters() {
        assert_eq!(DEFAULT_FIELD_DELIMITER, ",");
        assert_eq!(DEFAULT_QUOTE_DELIMITER, "\"");
        assert_eq!(DEFAULT_NEWLINE_DELIMITER, "\n");
        assert_eq!(RECORD_SEPARATOR, "\r\n");
    }

    #[test]
    fn test_config_file_names() {
        assert_eq!(CONFIG_FILE_NAMES.len(), 3);
        assert!(CONFIG_FILE_NAMES.contains(&"sqlexport.yaml"));
    }

    #[test]
    fn test_log_levels() {
        assert!(LOG_LEVELS.contains(&DEFAULT_LOG_LEVEL));
    }
}
