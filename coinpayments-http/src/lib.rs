//! HTTP client for the CoinPayments merchant API.
//!
//! [`CoinPaymentsClient`] validates, signs and sends one command per call and
//! turns the reply envelope into a result or a [`ClientError`].
//!
//! ```no_run
//! use coinpayments::{Credentials, Params};
//! use coinpayments_http::CoinPaymentsClient;
//!
//! # async fn run() -> Result<(), coinpayments_http::ClientError> {
//! let client = CoinPaymentsClient::new(Credentials::new("public", "private"));
//!
//! // Untyped: any catalog command by name.
//! let info = client.execute("get_tx_info", Params::new().with("txid", "CPXX")).await?;
//!
//! // Typed convenience method.
//! let balances = client.balances(Some(true)).await?;
//! # let _ = (info, balances);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] — Signed request dispatcher
//! - [`api`] — One convenience method per remote command
//! - [`config`] — Endpoint, timeout and transport settings
//! - [`error`] — Error taxonomy of a call
//!
//! # Feature Flags
//!
//! - `telemetry` - Wraps each call in a `tracing` span and logs failures

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use client::{CoinPaymentsClient, SignedRequest};
pub use config::ClientConfig;
pub use error::ClientError;
