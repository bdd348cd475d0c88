//! sqlexport CLI library
//!
//! Command definitions and the command bodies, written against generic
//! readers and writers so they can run on in-memory buffers.

pub mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use sqlexport_common::expand_home;
use sqlexport_core::{
    reference_scenarios, CanonicalDate, ConfigLoader, DateNormalizer, ExportConfig, NormalizeError,
    RawDateKind, RawDateValue, Result, SqlExportError,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "sqlexport")]
#[command(about = "Normalize date fields of SQL exports to YYYY/MM/DD")]
#[command(version)]
pub struct Cli {
    /// Additional configuration file (YAML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Database driver (mysql, sqlite, mssql)
    #[arg(long, global = true)]
    pub driver: Option<String>,

    /// Database host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Database name
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// UTC offset for epoch values, e.g. -05:00
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub epoch_offset: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Normalize the given values
    Normalize {
        /// Values to normalize
        #[arg(required = true)]
        values: Vec<String>,
        /// How to read each value
        #[arg(long, short, value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,
    },
    /// Normalize one value per line
    Batch {
        /// Input file (stdin when omitted)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Read each line as a JSON value
        #[arg(long, conflicts_with = "kind")]
        json: bool,
        /// How to read each line
        #[arg(long, short, value_enum, default_value_t = KindArg::Auto)]
        kind: KindArg,
        /// What to do with a row that cannot be normalized
        #[arg(long, value_enum, default_value_t = OnError::Fail)]
        on_error: OnError,
    },
    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(long, short, value_enum, default_value_t = ConfigFormat::Yaml)]
        format: ConfigFormat,
    },
    /// Run the reference normalization scenarios
    SelfTest,
}

/// How command-line text is turned into a raw date value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Integers are epochs (except compact `YYYYMMDD` dates), decimals are fractional epochs, the rest is text
    Auto,
    Text,
    Integer,
    Float,
    /// ISO `YYYY-MM-DD`
    Date,
}

impl KindArg {
    /// Read `text` as this kind
    ///
    /// # Errors
    /// Returns the error of [`RawDateValue::from_text_as`]
    pub fn to_raw(self, text: &str) -> std::result::Result<RawDateValue, NormalizeError> {
        let kind = match self {
            Self::Auto => return Ok(RawDateValue::infer(text)),
            Self::Text => RawDateKind::Text,
            Self::Integer => RawDateKind::Integer,
            Self::Float => RawDateKind::Float,
            Self::Date => RawDateKind::Calendar,
        };
        RawDateValue::from_text_as(kind, text)
    }
}

/// Handling of rows that fail to normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Abort with the line number
    Fail,
    /// Drop the row
    Skip,
    /// Write an empty line
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Options of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub json: bool,
    pub kind: KindArg,
    pub on_error: OnError,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            json: false,
            kind: KindArg::Auto,
            on_error: OnError::Fail,
        }
    }
}

/// Row counts of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Build the effective configuration: defaults, files, environment, then flags
///
/// # Errors
/// Returns an error if the `--config` file is missing or malformed, or the
/// result does not validate
pub fn build_config(cli: &Cli) -> Result<ExportConfig> {
    let mut loader = ConfigLoader::new().with_validation(false);
    if let Some(path) = &cli.config {
        // Explicit files must load; default ones are optional.
        ExportConfig::from_file(path)?;
        loader = loader.add_config_path(path);
    }
    let mut config = loader.load()?;

    if let Some(driver) = &cli.driver {
        config.driver = driver.parse()?;
    }
    if let Some(host) = &cli.host {
        config.host.clone_from(host);
    }
    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }
    if let Some(offset) = &cli.epoch_offset {
        config.epoch_offset.clone_from(offset);
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.output = Some(expand_home(log_file));
        config.logging.enabled = true;
    }

    config.validate()?;
    Ok(config)
}

/// Normalize each value and print one canonical date per line
///
/// # Errors
/// Returns the first normalization error, or an error if writing fails
pub fn run_normalize<W: Write>(
    normalizer: &DateNormalizer,
    values: &[String],
    kind: KindArg,
    writer: &mut W,
) -> Result<()> {
    for value in values {
        let raw = kind.to_raw(value)?;
        let date = normalizer.normalize(&raw)?;
        debug!("{} {:?} -> {}", raw.kind(), value, date);
        writeln!(writer, "{date}")?;
    }
    Ok(())
}

fn normalize_line(
    normalizer: &DateNormalizer,
    line: &str,
    options: &BatchOptions,
) -> Result<CanonicalDate> {
    if options.json {
        let value: Value = serde_json::from_str(line)?;
        return Ok(normalizer.normalize_value(&value)?);
    }
    let raw = options.kind.to_raw(line.trim())?;
    Ok(normalizer.normalize(&raw)?)
}

/// Normalize one value per input line
///
/// Blank lines are skipped and do not count as rows.
///
/// # Errors
/// Returns an error if reading or writing fails, or with [`OnError::Fail`] on
/// the first row that does not normalize
pub fn run_batch<R: BufRead, W: Write>(
    normalizer: &DateNormalizer,
    reader: R,
    writer: &mut W,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        summary.processed += 1;

        match normalize_line(normalizer, &line, options) {
            Ok(date) => writeln!(writer, "{date}")?,
            Err(e) => {
                summary.failed += 1;
                match options.on_error {
                    OnError::Fail => {
                        return Err(SqlExportError::validation(format!(
                            "Line {line_number}: {e}"
                        )));
                    }
                    OnError::Skip => warn!("Skipping line {}: {}", line_number, e),
                    OnError::Blank => {
                        warn!("Blanking line {}: {}", line_number, e);
                        writeln!(writer)?;
                    }
                }
            }
        }
    }

    info!(
        processed = summary.processed,
        failed = summary.failed,
        "Batch normalization finished"
    );
    Ok(summary)
}

/// Write a one-line note about rows that did not normalize
///
/// Nothing is written when every row normalized.
///
/// # Errors
/// Returns an error if writing fails
pub fn report_batch_failures<W: Write>(summary: &BatchSummary, writer: &mut W) -> Result<()> {
    if summary.failed > 0 {
        writeln!(
            writer,
            "sqlexport: {} of {} rows did not normalize",
            summary.failed, summary.processed
        )?;
    }
    Ok(())
}

/// Print the configuration with the password redacted
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn print_config<W: Write>(
    config: &ExportConfig,
    format: ConfigFormat,
    writer: &mut W,
) -> Result<()> {
    let rendered = config.redacted().render(format.as_str())?;
    write!(writer, "{rendered}")?;
    if !rendered.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}

/// Run the reference scenarios and print one status line per scenario
///
/// # Errors
/// Returns a validation error if any scenario fails, or an error if writing fails
pub fn run_self_test<W: Write>(writer: &mut W) -> Result<()> {
    let scenarios = reference_scenarios();
    let mut failed = 0;

    for scenario in &scenarios {
        let result = scenario.run();
        if scenario.expected.matches(&result) {
            writeln!(writer, "ok      {}", scenario.name)?;
        } else {
            failed += 1;
            let actual = match &result {
                Ok(date) => date.to_string(),
                Err(e) => e.to_string(),
            };
            writeln!(
                writer,
                "FAILED  {} (expected {:?}, got {})",
                scenario.name, scenario.expected, actual
            )?;
        }
    }

    writeln!(writer, "{} passed, {} failed", scenarios.len() - failed, failed)?;
    if failed > 0 {
        return Err(SqlExportError::validation(format!(
            "{failed} of {} reference scenarios failed",
            scenarios.len()
        )));
    }
    Ok(())
}
