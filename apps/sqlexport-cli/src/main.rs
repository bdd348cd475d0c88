//! sqlexport - normalize date fields of SQL exports to YYYY/MM/DD

use anyhow::Context;
use clap::Parser;
use sqlexport_cli::logging::init_logging;
use sqlexport_cli::{
    build_config, print_config, report_batch_failures, run_batch, run_normalize, run_self_test,
    BatchOptions, Cli, Commands,
};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli).context("Failed to load configuration")?;
    let _guard = init_logging(&config.logging, cli.verbose)?;
    debug!("Effective configuration: {:?}", config);

    let normalizer = config.normalizer()?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Normalize { values, kind } => {
            run_normalize(&normalizer, &values, kind, &mut stdout)?;
        }
        Commands::Batch {
            input,
            output,
            json,
            kind,
            on_error,
        } => {
            let reader: Box<dyn BufRead> = match &input {
                Some(path) => Box::new(BufReader::new(
                    File::open(path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                )),
                None => Box::new(std::io::stdin().lock()),
            };
            let mut writer: Box<dyn Write + '_> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(&mut stdout),
            };
            let options = BatchOptions {
                json,
                kind,
                on_error,
            };
            let summary = run_batch(&normalizer, reader, &mut writer, &options)?;
            writer.flush()?;
            report_batch_failures(&summary, &mut std::io::stderr())?;
        }
        Commands::Config { format } => {
            print_config(&config, format, &mut stdout)?;
        }
        Commands::SelfTest => {
            run_self_test(&mut stdout)?;
        }
    }

    Ok(())
}
