//! The JSON envelope wrapping every API reply.
//!
//! ```json
//! {"error": "ok", "result": {"username": "merchant"}}
//! ```
//!
//! `error` is the outcome discriminant: `"ok"` on success, a human-readable
//! message otherwise. `result` is command-specific and may be missing.

use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::constants::SUCCESS_MARKER;
use crate::error::RemoteError;

/// A decoded reply envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Outcome discriminant, if the service sent one.
    pub error: Option<Value>,
    /// Command-specific payload, if any.
    pub result: Option<Value>,
}

impl ResponseEnvelope {
    /// Parses a reply body.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if `body` is not JSON or is not a JSON
    /// object.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(serde_json::Error::custom(format!(
                "expected a JSON object envelope, got {}",
                kind(&other)
            ))),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let non_null = |v: Option<Value>| v.filter(|v| !v.is_null());
        Self {
            error: non_null(map.remove("error")),
            result: non_null(map.remove("result")),
        }
    }

    /// Returns `true` unless the envelope carries a non-`ok` discriminant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match &self.error {
            None => true,
            Some(Value::String(s)) => s == SUCCESS_MARKER,
            Some(_) => false,
        }
    }

    /// Splits the envelope into its outcome.
    ///
    /// A missing `result` on success is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] carrying the discriminant when it is present
    /// and not `"ok"`. String discriminants are taken verbatim, anything else
    /// is rendered as JSON text.
    pub fn into_result(self) -> Result<Option<Value>, RemoteError> {
        if self.is_success() {
            return Ok(self.result);
        }
        let message = match self.error {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Err(RemoteError::new(message))
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
