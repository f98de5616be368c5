//! Command-line arguments.
//!
//! Connection settings fall back to environment variables, which may also be
//! supplied through a `.env` file in the working directory.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use coinpayments::constants::DEFAULT_ENDPOINT;
use coinpayments::{Credentials, Params};
use coinpayments_http::ClientConfig;

/// CoinPayments merchant API client.
#[derive(Debug, Parser)]
#[command(name = "coinpayments", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List every remote command with its required fields.
    Commands,
    /// Run one remote command and print its result as JSON.
    Call(CallArgs),
}

#[derive(Debug, Args)]
pub struct CallArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Remote command name, e.g. `get_basic_info`.
    pub command: String,

    /// Command parameters as `key=value`, sent in the order given.
    #[arg(value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

impl CallArgs {
    /// Collects the `key=value` pairs into request parameters.
    pub fn params(&self) -> Params {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Public API key.
    #[arg(long, env = "COINPAYMENTS_PUBLIC_KEY")]
    pub public_key: String,

    /// Private API key, used only to sign requests.
    #[arg(long, env = "COINPAYMENTS_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// API endpoint URL.
    #[arg(long, env = "COINPAYMENTS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds; 0 disables the timeout.
    #[arg(long, env = "COINPAYMENTS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Send parameters in the request body only, not in the URL query.
    #[arg(long)]
    pub body_only: bool,
}

impl ConnectionArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.public_key, &self.private_key)
    }

    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::new(&self.endpoint).with_duplicate_query(!self.body_only);
        if self.timeout_secs == 0 {
            config.without_timeout()
        } else {
            config.with_timeout(Duration::from_secs(self.timeout_secs))
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(parse_param("txid=CPA1"), Ok(("txid".into(), "CPA1".into())));
        assert_eq!(parse_param("note="), Ok(("note".into(), String::new())));
        assert_eq!(
            parse_param("url=https://x.example/?a=b"),
            Ok(("url".into(), "https://x.example/?a=b".into()))
        );
        assert!(parse_param("=value").is_err());
        assert!(parse_param("novalue").is_err());
    }

    #[test]
    fn call_arguments_build_ordered_params() {
        let cli = Cli::try_parse_from([
            "coinpayments",
            "call",
            "--public-key",
            "pub",
            "--private-key",
            "priv",
            "--timeout-secs",
            "0",
            "--body-only",
            "create_transfer",
            "amount=1",
            "currency=BTC",
            "pbntag=$Alex",
        ])
        .unwrap();
        let CliCommand::Call(args) = cli.command else {
            panic!("expected call subcommand");
        };
        assert_eq!(args.command, "create_transfer");
        assert_eq!(
            args.params().to_form_string(),
            "amount=1&currency=BTC&pbntag=%24Alex"
        );
        let config = args.connection.client_config();
        assert_eq!(config.timeout, None);
        assert!(!config.duplicate_query);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.connection.credentials().public_key(), "pub");
    }
}
