use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_LOG_PATH: &str = "~/logs/xero-bank-transform";
const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%SZ";

/// Convert a bank CSV statement into a Xero bank statement import file.
#[derive(Parser, Debug)]
#[command(name = "xero-bank-transform", version, about)]
pub struct Cli {
    /// CSV file to read from
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// CSV file to output to
    #[arg(long, value_name = "PATH")]
    pub outfile: PathBuf,

    /// Path to console log files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_PATH)]
    pub logpath: String,

    /// Also write the console log to a file under --logpath
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub outputconsole: bool,
}

#[derive(Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: Cli, started: DateTime<Utc>) -> Result<Self> {
        let log_dir = if cli.logpath.starts_with('~') {
            let home = std::env::var("HOME").context("HOME is not set")?;
            expand_home(&cli.logpath, &home)
        } else {
            PathBuf::from(&cli.logpath)
        };

        let log_file = cli.outputconsole.then(|| {
            log_dir.join(format!(
                "console_{}.log",
                started.format(LOG_TIMESTAMP_FORMAT)
            ))
        });

        Ok(Self {
            input: cli.file,
            output: cli.outfile,
            log_dir,
            log_file,
        })
    }

    pub fn log_settings(&self) {
        info!("CSV import file - {}", self.input.display());
        info!("CSV output file - {}", self.output.display());
        info!("Path to log files - {}", self.log_dir.display());
        match &self.log_file {
            Some(path) => info!("Console log file - {}", path.display()),
            None => info!("Console log file disabled"),
        }
    }
}

/// Replaces a leading `~` with `home`.
fn expand_home(path: &str, home: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) => PathBuf::from(format!("{}{}", home, rest)),
        None => PathBuf::from(path),
    }
}
