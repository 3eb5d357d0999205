//! # costcode: Back-Office Cost Code Tool
//!
//! Lets a manager encode costs for labels, read codes back, and see which
//! scheme the store is configured with.
//!
//! ## Module Organization
//! ```text
//! costcode_cli/
//! ├── lib.rs       ◄─── You are here (arguments, logging, dispatch)
//! ├── commands.rs  ◄─── encode / decode / check / show
//! └── error.rs     ◄─── CliError with exit statuses
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, so stdout stays script-friendly)
//! 3. Load config: `--config`, else platform config dir, then `COSTCODE_*`
//! 4. Build the codec and run the command

pub mod commands;
pub mod error;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use costcode_config::CostCodeConfig;

use crate::error::CliError;

/// Encode and decode product cost codes.
#[derive(Debug, Parser)]
#[command(name = "costcode", version, about)]
pub struct Cli {
    /// Config file (default: platform config dir / costcode.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn a cost into a code (fractions are dropped, negatives become 0)
    Encode {
        #[arg(allow_negative_numbers = true)]
        cost: f64,
    },
    /// Turn a code back into a cost
    Decode { code: String },
    /// Check whether a code is valid (exit status 1 if not)
    Check { code: String },
    /// Print the active scheme
    Show,
}

/// Parses arguments from the process and runs.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

/// Runs already parsed arguments.
pub fn execute(cli: Cli) -> ExitCode {
    match dispatch(&cli) {
        Ok(code) => code,
        Err(err) => {
            if cli.json {
                match serde_json::to_string(&err) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("{}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            err.exit_code()
        }
    }
}

fn dispatch(cli: &Cli) -> Result<ExitCode, CliError> {
    let config = match &cli.config {
        // A broken explicit config is an error; the default location falls back.
        Some(path) => CostCodeConfig::load(Some(path.clone()))?,
        None => CostCodeConfig::load_or_default(None),
    };
    let codec = config.codec()?;
    debug!(scheme = ?codec.mapping().to_spec(), "Using cost code scheme");

    match &cli.command {
        Command::Encode { cost } => print(cli.json, &commands::encode(&codec, *cost))?,
        Command::Decode { code } => {
            print(cli.json, &commands::decode(&codec, &config.display, code)?)?
        }
        Command::Check { code } => {
            let out = commands::check(&codec, code);
            print(cli.json, &out)?;
            if !out.valid {
                info!(code = %out.code, "Code did not validate");
                return Ok(ExitCode::from(1));
            }
        }
        Command::Show => print(cli.json, &commands::show(&codec))?,
    }

    Ok(ExitCode::SUCCESS)
}

fn print<T: Serialize + Display>(json: bool, out: &T) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(out)?);
    } else {
        println!("{out}");
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=costcode=trace` - Trace for the costcode crates only
/// - Default: warnings only, `--verbose` raises costcode crates to debug
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,costcode=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
