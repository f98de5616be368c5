//! Command-line client for the CoinPayments merchant API.
//!
//! # Usage
//!
//! ```bash
//! # List commands and their required fields
//! coinpayments commands
//!
//! # Run a command
//! COINPAYMENTS_PUBLIC_KEY=... COINPAYMENTS_PRIVATE_KEY=... \
//!     coinpayments call get_tx_info txid=CPXXXX full=1
//!
//! # Configure logging level
//! RUST_LOG=coinpayments_http=debug coinpayments call balances
//! ```
//!
//! # Environment Variables
//!
//! - `COINPAYMENTS_PUBLIC_KEY` — Public API key
//! - `COINPAYMENTS_PRIVATE_KEY` — Private API key
//! - `COINPAYMENTS_ENDPOINT` — Override the API endpoint
//! - `COINPAYMENTS_TIMEOUT_SECS` — Request timeout (default: `30`, `0` disables)
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

mod cli;

use std::io::Write;

use clap::Parser;
use coinpayments::Command;
use coinpayments_http::CoinPaymentsClient;
use tracing_subscriber::EnvFilter;

use crate::cli::{CallArgs, Cli, CliCommand};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        CliCommand::Commands => list_commands(),
        CliCommand::Call(args) => call(args).await,
    }
}

fn list_commands() -> Result<(), Box<dyn std::error::Error>> {
    let mut out = std::io::stdout().lock();
    for command in Command::ALL {
        let required: Vec<String> = command
            .requirements()
            .iter()
            .map(ToString::to_string)
            .collect();
        if required.is_empty() {
            writeln!(out, "{command}")?;
        } else {
            writeln!(out, "{command:<24} {}", required.join(", "))?;
        }
    }
    Ok(())
}

async fn call(args: CallArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client =
        CoinPaymentsClient::try_new(args.connection.credentials(), args.connection.client_config())?;
    tracing::info!(
        cmd = %args.command,
        endpoint = %client.endpoint(),
        params = args.params.len(),
        "Calling CoinPayments"
    );

    let result = client.execute(&args.command, args.params()).await?;
    let rendered = serde_json::to_string_pretty(&result.unwrap_or_default())?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{rendered}")?;
    Ok(())
}
