//! Error types raised before and after a request leaves the client.

/// A request was rejected locally, before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The command name is not part of the catalog.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A required field, or every member of an alternative group, is absent.
    #[error("missing parameter: {0}")]
    MissingParameter(String),
}

/// The remote service answered with a non-`ok` status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("remote error: {message}")]
pub struct RemoteError {
    /// The value of the envelope's `error` field.
    pub message: String,
}

impl RemoteError {
    /// Creates a remote error carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
