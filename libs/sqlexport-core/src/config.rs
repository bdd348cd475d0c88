//! Exporter configuration
//!
//! Connection identity, output location, logging and delimiter settings of an
//! export run, plus the UTC offset for epoch dates. The canonical date layout
//! is not configurable.

use crate::error::{Result, SqlExportError};
use crate::normalize::DateNormalizer;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use sqlexport_common::{
    expand_home, parse_bool_flag, DEFAULT_EPOCH_OFFSET, DEFAULT_FIELD_DELIMITER, DEFAULT_HOST,
    DEFAULT_LOG_LEVEL, DEFAULT_NEWLINE_DELIMITER, DEFAULT_OUTPUT_FILENAME, DEFAULT_QUOTE_DELIMITER,
    ENV_DRIVER, ENV_EPOCH_OFFSET, ENV_LOGGING, ENV_LOG_FILE, ENV_LOG_JSON, ENV_LOG_LEVEL,
    ENV_OUTPUT, ENV_SQL_DB, ENV_SQL_HOST, ENV_SQL_PASSWORD, LOG_LEVELS, RECORD_SEPARATOR,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const REDACTED: &str = "********";

/// Database driver the rows are fetched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Mysql,
    Sqlite,
    Mssql,
}

impl DatabaseDriver {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
            Self::Mssql => "mssql",
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = SqlExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            "mssql" | "sqlserver" => Ok(Self::Mssql),
            other => Err(SqlExportError::configuration(format!(
                "Unsupported database driver: {other}. Must be one of: mysql, sqlite, mssql"
            ))),
        }
    }
}

/// Delimiters of the load-file format
///
/// Only the values live here; escaping and record writing belong to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delimiters {
    /// Field break indicator
    pub field: String,
    /// Keeps text with spaces together
    pub quote: String,
    /// Line break inside a field
    pub newline: String,
    /// Starts a new record
    pub record: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: DEFAULT_FIELD_DELIMITER.to_string(),
            quote: DEFAULT_QUOTE_DELIMITER.to_string(),
            newline: DEFAULT_NEWLINE_DELIMITER.to_string(),
            record: RECORD_SEPARATOR.to_string(),
        }
    }
}

impl Delimiters {
    /// Validate the delimiter set
    ///
    /// # Errors
    /// Returns a validation error for empty delimiters, a field delimiter equal
    /// to the quote, or a record separator other than CRLF
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("field", &self.field),
            ("quote", &self.quote),
            ("newline", &self.newline),
            ("record", &self.record),
        ] {
            if value.is_empty() {
                return Err(SqlExportError::validation(format!(
                    "The {name} delimiter cannot be empty"
                )));
            }
        }
        if self.field == self.quote {
            return Err(SqlExportError::validation(
                "Field and quote delimiters must differ",
            ));
        }
        if self.record != RECORD_SEPARATOR {
            return Err(SqlExportError::validation(
                "The record separator is fixed to CRLF",
            ));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether logging is on at all
    pub enabled: bool,
    /// Log file; stderr when unset
    pub output: Option<PathBuf>,
    /// Level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output: None,
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Configuration of an export run
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub driver: DatabaseDriver,
    pub host: String,
    pub password: Option<String>,
    pub database: Option<String>,
    pub output_path: PathBuf,
    /// `+HH:MM` / `-HH:MM` offset at which epoch values take their date
    pub epoch_offset: String,
    pub logging: LoggingConfig,
    pub delimiters: Delimiters,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            host: DEFAULT_HOST.to_string(),
            password: None,
            database: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            epoch_offset: DEFAULT_EPOCH_OFFSET.to_string(),
            logging: LoggingConfig::default(),
            delimiters: Delimiters::default(),
        }
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("database", &self.database)
            .field("output_path", &self.output_path)
            .field("epoch_offset", &self.epoch_offset)
            .field("logging", &self.logging)
            .field("delimiters", &self.delimiters)
            .finish()
    }
}

impl ExportConfig {
    /// Load configuration from a YAML (`.yaml`/`.yml`) or JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SqlExportError::configuration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let mut config: Self = if is_yaml_path(path) {
            serde_yaml::from_str(&content).map_err(|e| {
                SqlExportError::configuration(format!("Failed to parse YAML config: {e}"))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                SqlExportError::configuration(format!("Failed to parse JSON config: {e}"))
            })?
        };
        config.expand_paths();
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Arguments
    /// * `path` - Destination file
    /// * `format` - `"json"` or `"yaml"`
    ///
    /// # Errors
    /// Returns an error for an unknown format or if the file cannot be written
    pub fn to_file<P: AsRef<Path>>(&self, path: P, format: &str) -> Result<()> {
        let content = self.render(format)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render the configuration as `"json"` or `"yaml"` text
    ///
    /// # Errors
    /// Returns an error for an unknown format or a serialization failure
    pub fn render(&self, format: &str) -> Result<String> {
        match format.to_lowercase().as_str() {
            "json" => Ok(serde_json::to_string_pretty(self)?),
            "yaml" | "yml" => Ok(serde_yaml::to_string(self)?),
            other => Err(SqlExportError::configuration(format!(
                "Unsupported config format: {other}"
            ))),
        }
    }

    /// Overlay the environment variables that are set
    ///
    /// # Errors
    /// Returns a configuration error for an unknown driver or a malformed flag
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var(ENV_SQL_HOST) {
            self.host = host;
        }
        if let Ok(password) = std::env::var(ENV_SQL_PASSWORD) {
            self.password = Some(password);
        }
        if let Ok(database) = std::env::var(ENV_SQL_DB) {
            self.database = Some(database);
        }
        if let Ok(driver) = std::env::var(ENV_DRIVER) {
            self.driver = driver.parse()?;
        }
        if let Ok(output) = std::env::var(ENV_OUTPUT) {
            self.output_path = expand_home(Path::new(&output));
        }
        if let Ok(offset) = std::env::var(ENV_EPOCH_OFFSET) {
            self.epoch_offset = offset;
        }
        if let Ok(enabled) = std::env::var(ENV_LOGGING) {
            self.logging.enabled = env_flag(ENV_LOGGING, &enabled)?;
        }
        if let Ok(log_file) = std::env::var(ENV_LOG_FILE) {
            self.logging.output = Some(expand_home(Path::new(&log_file)));
            self.logging.enabled = true;
        }
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            self.logging.level = level.to_lowercase();
        }
        if let Ok(json) = std::env::var(ENV_LOG_JSON) {
            self.logging.json = env_flag(ENV_LOG_JSON, &json)?;
        }
        Ok(())
    }

    /// Create configuration from defaults plus environment variables
    ///
    /// # Errors
    /// See [`ExportConfig::apply_env`]
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Merge another configuration into this one; fields of `other` that
    /// differ from the defaults win
    pub fn merge_with(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.driver != defaults.driver {
            self.driver = other.driver;
        }
        if other.host != defaults.host {
            self.host.clone_from(&other.host);
        }
        if other.password.is_some() {
            self.password.clone_from(&other.password);
        }
        if other.database.is_some() {
            self.database.clone_from(&other.database);
        }
        if other.output_path != defaults.output_path {
            self.output_path.clone_from(&other.output_path);
        }
        if other.epoch_offset != defaults.epoch_offset {
            self.epoch_offset.clone_from(&other.epoch_offset);
        }

        if other.logging.enabled {
            self.logging.enabled = true;
        }
        if other.logging.output.is_some() {
            self.logging.output.clone_from(&other.logging.output);
        }
        if other.logging.level != defaults.logging.level {
            self.logging.level.clone_from(&other.logging.level);
        }
        if other.logging.json {
            self.logging.json = true;
        }

        if other.delimiters != defaults.delimiters {
            self.delimiters = other.delimiters.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns a configuration or validation error describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SqlExportError::configuration("Host cannot be empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(SqlExportError::configuration("Output path cannot be empty"));
        }
        self.parsed_epoch_offset()?;
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SqlExportError::configuration(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        self.delimiters.validate()
    }

    /// The epoch offset as a chrono offset
    ///
    /// # Errors
    /// Returns a configuration error unless the offset reads as `+HH:MM` or `-HH:MM`
    pub fn parsed_epoch_offset(&self) -> Result<FixedOffset> {
        self.epoch_offset.trim().parse::<FixedOffset>().map_err(|e| {
            SqlExportError::configuration(format!(
                "Invalid epoch offset: {}. Expected +HH:MM or -HH:MM ({e})",
                self.epoch_offset
            ))
        })
    }

    /// Normalizer using the configured epoch offset
    ///
    /// # Errors
    /// See [`ExportConfig::parsed_epoch_offset`]
    pub fn normalizer(&self) -> Result<DateNormalizer> {
        Ok(DateNormalizer::with_epoch_offset(self.parsed_epoch_offset()?))
    }

    /// Copy of the configuration that is safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.password.is_some() {
            copy.password = Some(REDACTED.to_string());
        }
        copy
    }

    fn expand_paths(&mut self) {
        self.output_path = expand_home(&self.output_path);
        if let Some(output) = &self.logging.output {
            self.logging.output = Some(expand_home(output));
        }
    }
}

fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

fn env_flag(name: &str, value: &str) -> Result<bool> {
    parse_bool_flag(value)
        .ok_or_else(|| SqlExportError::configuration(format!("Invalid {name} value: {value}")))
}
