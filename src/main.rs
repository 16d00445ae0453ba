mod config;
mod logging;

use crate::config::{Cli, Config};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use xero_bank_transform::{create_import, engine::Transformer, open_statement};

/// Errors before logging is up are printed by anyhow. Later ones go through
/// the log only.
fn main() -> Result<ExitCode> {
    let started = Utc::now();
    let config = Config::from_cli(Cli::parse(), started)?;
    logging::init(&config)?;

    info!("Bank Statements Transform tool");
    info!("Started at {}", started);
    config.log_settings();

    Ok(exit_status(process_statement(&config)))
}

fn exit_status(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn process_statement(config: &Config) -> Result<()> {
    let mut reader = open_statement(&config.input)
        .with_context(|| format!("opening {}", config.input.display()))?;
    let mut writer = create_import(&config.output)
        .with_context(|| format!("creating {}", config.output.display()))?;

    let summary = Transformer::new().run(&mut reader, &mut writer)?;

    info!("Transform completed");
    info!("{} total transactions found in CSV", summary.transactions);
    info!(
        skipped = summary.skipped,
        malformed = summary.malformed,
        credit_total = %summary.credit_total,
        debit_total = %summary.debit_total,
        "Run summary"
    );
    info!("Completed at {}", Utc::now());

    Ok(())
}
