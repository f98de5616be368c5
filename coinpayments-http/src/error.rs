//! Errors returned by [`CoinPaymentsClient`](crate::CoinPaymentsClient).
//!
//! Every failure of a call is reported as one [`ClientError`] variant; none
//! are retried. Validation failures are raised before any request is sent.

use coinpayments::{RemoteError, ValidationError};
use http::StatusCode;

/// Errors that can occur while executing a remote command.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The command name is not part of the catalog.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required field, or every member of an alternative group, is absent.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// The configured endpoint is not a valid URL.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// No response was obtained: connection failure, timeout, or an
    /// unreadable body.
    #[error("HTTP transport error: {context}: {source}")]
    Transport {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a status other than 200.
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The 200 response body is not a JSON object.
    #[error("Malformed response envelope: {source}")]
    MalformedResponse {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// The raw response body.
        body: String,
    },

    /// The service reported a non-`ok` status.
    #[error("remote error: {0}")]
    Remote(String),
}

impl ClientError {
    /// Returns `true` for failures raised before a request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::UnknownCommand(_) | Self::MissingParameter(_))
    }

    /// Returns `true` if no response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownCommand(name) => Self::UnknownCommand(name),
            ValidationError::MissingParameter(name) => Self::MissingParameter(name),
        }
    }
}

impl From<RemoteError> for ClientError {
    fn from(err: RemoteError) -> Self {
        Self::Remote(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_flat_variants() {
        let err = ClientError::from(ValidationError::MissingParameter("txid".into()));
        assert!(matches!(err, ClientError::MissingParameter(ref name) if name == "txid"));
        assert!(err.is_validation());
        assert!(!err.is_transport());

        let err = ClientError::from(ValidationError::UnknownCommand("bogus_cmd".into()));
        assert_eq!(err.to_string(), "unknown command: bogus_cmd");
    }

    #[test]
    fn remote_error_keeps_message() {
        let err = ClientError::from(RemoteError::new("Invalid API key"));
        assert_eq!(err.to_string(), "remote error: Invalid API key");
    }
}
