#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the CoinPayments merchant API.
//!
//! This crate holds everything about a request that does not involve the
//! network: which commands exist and what each one requires, how parameters
//! are ordered and form-encoded, how the encoded string is signed, and how
//! the reply envelope is interpreted. The HTTP dispatcher lives in
//! `coinpayments-http`.
//!
//! # Modules
//!
//! - [`command`] - The closed set of remote commands
//! - [`registry`] - Required-parameter groups per command and presence validation
//! - [`params`] - Ordered parameter mapping and form encoding
//! - [`signing`] - API key pair and HMAC-SHA-512 signatures
//! - [`envelope`] - Reply envelope interpretation
//! - [`requests`] - Typed request builders, one per command
//! - [`constants`] - Wire constants
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing of validation failures

pub mod command;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod params;
pub mod registry;
pub mod requests;
pub mod signing;

pub use command::Command;
pub use envelope::ResponseEnvelope;
pub use error::{RemoteError, ValidationError};
pub use params::{ParamValue, Params};
pub use registry::{Requirement, requirements_for, validate};
pub use requests::ApiRequest;
pub use signing::Credentials;
