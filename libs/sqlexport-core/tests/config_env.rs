//! Environment-driven configuration tests
//!
//! These mutate process environment variables, so they run serially.

use serial_test::serial;
use sqlexport_core::{ConfigLoader, DatabaseDriver, ExportConfig, RawDateValue, SqlExportError};
use std::path::PathBuf;
use tempfile::TempDir;

const VARS: &[&str] = &[
    "SQL_HOST",
    "SQL_PASSWORD",
    "SQL_DB",
    "SQLEXPORT_DRIVER",
    "SQLEXPORT_OUTPUT",
    "SQLEXPORT_LOGGING",
    "SQLEXPORT_LOG_FILE",
    "SQLEXPORT_LOG_LEVEL",
    "SQLEXPORT_LOG_JSON",
    "SQLEXPORT_EPOCH_OFFSET",
];

/// Clears the exporter variables on creation and again on drop
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        clear_vars();
        Self
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_vars();
    }
}

fn clear_vars() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_without_variables_is_default() {
    let _guard = EnvGuard::new();
    assert_eq!(ExportConfig::from_env().unwrap(), ExportConfig::default());
}

#[test]
#[serial]
fn test_from_env_reads_connection_variables() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQL_HOST", "sql.example");
    std::env::set_var("SQL_PASSWORD", "s3cret");
    std::env::set_var("SQL_DB", "ledger");
    std::env::set_var("SQLEXPORT_DRIVER", "MSSQL");

    let config = ExportConfig::from_env().unwrap();
    assert_eq!(config.host, "sql.example");
    assert_eq!(config.password.as_deref(), Some("s3cret"));
    assert_eq!(config.database.as_deref(), Some("ledger"));
    assert_eq!(config.driver, DatabaseDriver::Mssql);
}

#[test]
#[serial]
fn test_log_file_enables_logging() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQLEXPORT_LOG_FILE", "/tmp/sqlexport.log");
    std::env::set_var("SQLEXPORT_LOG_LEVEL", "DEBUG");

    let config = ExportConfig::from_env().unwrap();
    assert!(config.logging.enabled);
    assert_eq!(
        config.logging.output,
        Some(PathBuf::from("/tmp/sqlexport.log"))
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
#[serial]
fn test_bad_driver_is_configuration_error() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQLEXPORT_DRIVER", "oracle");
    assert!(matches!(
        ExportConfig::from_env(),
        Err(SqlExportError::Configuration { .. })
    ));
}

#[test]
#[serial]
fn test_bad_flag_is_configuration_error() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQLEXPORT_LOGGING", "perhaps");
    assert!(ExportConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_epoch_offset_from_env() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQLEXPORT_EPOCH_OFFSET", "-05:00");

    let config = ExportConfig::from_env().unwrap();
    let date = config
        .normalizer()
        .unwrap()
        .normalize(&RawDateValue::IntegerEpoch(1_535_516_087))
        .unwrap();
    assert_eq!(date.as_str(), "2018/08/28");

    std::env::set_var("SQLEXPORT_EPOCH_OFFSET", "CET");
    let loaded = ConfigLoader::new()
        .with_config_paths::<PathBuf>(vec![])
        .load();
    assert!(loaded.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let _guard = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sqlexport.yaml");
    std::fs::write(&path, "host: file.example\ndatabase: from_file\n").unwrap();
    std::env::set_var("SQL_HOST", "env.example");

    let config = ConfigLoader::new()
        .with_config_paths(vec![&path])
        .load()
        .unwrap();
    assert_eq!(config.host, "env.example");
    assert_eq!(config.database.as_deref(), Some("from_file"));
}

#[test]
#[serial]
fn test_output_path_expands_home() {
    let _guard = EnvGuard::new();
    std::env::set_var("SQLEXPORT_OUTPUT", "~/.sqlexport-output.csv");

    let config = ExportConfig::from_env().unwrap();
    if let Ok(home) = std::env::var("HOME") {
        assert_eq!(
            config.output_path,
            PathBuf::from(home).join(".sqlexport-output.csv")
        );
    }
}
