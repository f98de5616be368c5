//! Configuration for [`CoinPaymentsClient`](crate::CoinPaymentsClient).

use std::time::Duration;

use coinpayments::constants::DEFAULT_ENDPOINT;

/// Transport settings for a client.
///
/// Credentials are passed separately so that a config can be shared between
/// clients bound to different key pairs.
#[derive(Clone)]
pub struct ClientConfig {
    /// API endpoint URL.
    pub endpoint: String,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Also send the encoded parameters in the URL query string.
    ///
    /// The remote service has always received them this way; turning it off
    /// sends the parameters in the body only.
    pub duplicate_query: bool,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Some(Self::DEFAULT_TIMEOUT),
            duplicate_query: true,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a config targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables the request timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Enables or disables duplicating parameters into the query string.
    #[must_use]
    pub const fn with_duplicate_query(mut self, enabled: bool) -> Self {
        self.duplicate_query = enabled;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("duplicate_query", &self.duplicate_query)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}
