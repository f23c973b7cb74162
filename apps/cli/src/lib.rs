//! # BillSplit CLI Library
//!
//! Command-line front end for `billsplit-core`.
//! `main.rs` only calls [`run`]; everything else lives here so it can be
//! tested.
//!
//! ## Module Organization
//! ```text
//! billsplit_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & run)
//! ├── config.rs       ◄─── Layered AppConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Bill file loading, command exports
//! │   ├── split.rs    ◄─── Per-person totals
//! │   ├── settle.rs   ◄─── Who pays whom, UPI links
//! │   ├── export.rs   ◄─── Plain-text summary
//! │   └── demo.rs     ◄─── Sample bill
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Usage
//! ```text
//! billsplit split dinner.json            # totals per person
//! billsplit split dinner.json --json     # raw split result
//! billsplit settle dinner.json --payee p2
//! billsplit export dinner.json > summary.txt
//! billsplit demo > dinner.json
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Split a shared bill by who had what.
#[derive(Debug, Parser)]
#[command(name = "billsplit", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what each participant owes
    Split {
        /// Bill JSON file
        bill: PathBuf,

        /// Print the raw split result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show who owes the payee, with UPI payment links
    Settle {
        /// Bill JSON file
        bill: PathBuf,

        /// Participant id collecting the money
        #[arg(long)]
        payee: Option<String>,
    },

    /// Print a plain-text summary to share
    Export {
        /// Bill JSON file
        bill: PathBuf,
    },

    /// Print a sample bill as JSON
    Demo,
}

/// Runs the CLI.
///
/// ## Startup Sequence
/// 1. Initialize tracing (stderr, so stdout stays pipeable)
/// 2. Parse arguments
/// 3. Load configuration
/// 4. Run the command and print its output
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "Arguments parsed");

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(currency = %config.currency_code, "Configuration loaded");

    let output = execute(cli.command, &config)?;
    print!("{output}");

    Ok(())
}

/// Runs one command and returns what it would print.
pub fn execute(command: Command, config: &AppConfig) -> error::AppResult<String> {
    let format = config.currency_format();

    match command {
        Command::Split { bill, json } => {
            let bill = commands::load_bill(&bill)?;
            commands::split::split(&bill, &format, json)
        }
        Command::Settle { bill, payee } => {
            let bill = commands::load_bill(&bill)?;
            commands::settle::settle(&bill, payee.as_deref(), config)
        }
        Command::Export { bill } => {
            let bill = commands::load_bill(&bill)?;
            let now = chrono::Local::now().naive_local();
            Ok(commands::export::export(&bill, &format, now))
        }
        Command::Demo => commands::demo::demo(),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=billsplit_core=trace` - Show trace for the core only
/// - Default: INFO, DEBUG for billsplit crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,billsplit_core=debug,billsplit_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_split_with_global_config() {
        let cli = Cli::try_parse_from([
            "billsplit",
            "split",
            "dinner.json",
            "--json",
            "--config",
            "my.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        match cli.command {
            Command::Split { bill, json } => {
                assert_eq!(bill, PathBuf::from("dinner.json"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_settle_payee() {
        let cli = Cli::try_parse_from(["billsplit", "settle", "dinner.json", "--payee", "p2"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settle { payee: Some(ref id), .. } if id == "p2"
        ));
    }

    #[test]
    fn test_split_requires_bill() {
        assert!(Cli::try_parse_from(["billsplit", "split"]).is_err());
    }

    #[test]
    fn test_execute_demo() {
        let out = execute(Command::Demo, &AppConfig::default()).unwrap();
        assert!(out.contains("Pizza Margherita"));
    }

    #[test]
    fn test_execute_missing_bill_file() {
        let err = execute(
            Command::Export {
                bill: PathBuf::from("/definitely/not/here.json"),
            },
            &AppConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, error::AppError::ReadBill { .. }));
    }
}
