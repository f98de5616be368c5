//! Signed request dispatcher for the CoinPayments merchant API.
//!
//! [`CoinPaymentsClient`] runs one remote command end to end:
//!
//! 1. validates parameter presence against the command registry
//! 2. prepends `cmd` and appends `version`, `format` and `key`
//! 3. form-encodes the parameters once and signs that exact string with
//!    HMAC-SHA-512
//! 4. POSTs the string as the body (and, by default, as the URL query) with
//!    the signature in the `HMAC` header
//! 5. interprets the reply envelope
//!
//! Nothing is retried. Validation failures never reach the network.
//!
//! ## Features
//!
//! - Uses `reqwest` for async HTTP requests, one pooled client per instance
//! - Supports an optional per-request timeout
//! - Integrates with `tracing` if the `telemetry` feature is enabled

use std::fmt::Display;
use std::time::Duration;

use coinpayments::constants::{
    API_VERSION, FORM_CONTENT_TYPE, HMAC_HEADER, RESPONSE_FORMAT, fields,
};
use coinpayments::{Command, Credentials, Params, ResponseEnvelope, registry};
use http::StatusCode;
use http::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// A request that passed validation and carries its signature.
///
/// `body` is the exact string the signature covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// The command being issued.
    pub command: Command,
    /// Form-encoded parameters including the universal fields.
    pub body: String,
    /// Lowercase hex HMAC-SHA-512 of `body`.
    pub signature: String,
}

/// A client bound to one CoinPayments API key pair.
///
/// Cloning is cheap and clones share the underlying connection pool. Calls
/// take `&self` and own their parameters, so one client can serve
/// concurrent tasks without locking.
#[derive(Clone, Debug)]
pub struct CoinPaymentsClient {
    /// API key pair used for `key` and the signature
    credentials: Credentials,
    /// Full URL of the API endpoint
    endpoint: Url,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
    /// Whether parameters are also sent in the URL query
    duplicate_query: bool,
}

impl CoinPaymentsClient {
    /// Creates a client for the production endpoint with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        let config = ClientConfig::default();
        Self {
            credentials,
            endpoint: Url::parse(&config.endpoint).expect("default endpoint is a valid URL"),
            client: Client::new(),
            timeout: config.timeout,
            duplicate_query: config.duplicate_query,
        }
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UrlParse`] if the configured endpoint is not a
    /// valid URL.
    pub fn try_new(credentials: Credentials, config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| ClientError::UrlParse {
            context: "Failed to parse API endpoint",
            source: e,
        })?;
        Ok(Self {
            credentials,
            endpoint,
            client: config.http_client.unwrap_or_default(),
            timeout: config.timeout,
            duplicate_query: config.duplicate_query,
        })
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the public key identifier.
    #[must_use]
    pub fn public_key(&self) -> &str {
        self.credentials.public_key()
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Executes a command given by its wire name.
    ///
    /// Returns the envelope's `result`, or `None` when the service sent none.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnknownCommand`] if `command` is not in the catalog
    /// - [`ClientError::MissingParameter`] if a required field is absent
    /// - [`ClientError::Transport`] if no response was obtained
    /// - [`ClientError::HttpStatus`] if the status is not 200
    /// - [`ClientError::MalformedResponse`] if the body is not a JSON object
    /// - [`ClientError::Remote`] if the service reported an error
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "coinpayments.execute",
            skip_all,
            fields(
                cmd = command,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty
            )
        )
    )]
    pub async fn execute(&self, command: &str, params: Params) -> Result<Option<Value>, ClientError> {
        let result = match command.parse::<Command>() {
            Ok(command) => self.dispatch(command, params).await,
            Err(err) => Err(err.into()),
        };
        record_result_on_span(&result);
        result
    }

    /// Executes a typed command.
    ///
    /// # Errors
    ///
    /// Same as [`CoinPaymentsClient::execute`], minus `UnknownCommand`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "coinpayments.call",
            skip_all,
            fields(
                cmd = %command,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty
            )
        )
    )]
    pub async fn call(&self, command: Command, params: Params) -> Result<Option<Value>, ClientError> {
        let result = self.dispatch(command, params).await;
        record_result_on_span(&result);
        result
    }

    async fn dispatch(&self, command: Command, params: Params) -> Result<Option<Value>, ClientError> {
        let request = self.prepare(command, params)?;
        self.send_signed(request).await
    }

    /// Validates, augments, encodes and signs a request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] if a required field is absent.
    pub fn prepare(&self, command: Command, params: Params) -> Result<SignedRequest, ClientError> {
        registry::validate(command, &params)?;
        let body = self.augment(command, params).to_form_string();
        let signature = self.credentials.sign(body.as_bytes());
        Ok(SignedRequest {
            command,
            body,
            signature,
        })
    }

    /// Builds the outgoing mapping: `cmd` first, caller fields in order, then
    /// the universal fields, which replace caller values of the same name.
    fn augment(&self, command: Command, params: Params) -> Params {
        let mut outgoing = Params::with_capacity(params.len() + 4);
        outgoing.insert(fields::CMD, command.as_str());
        outgoing.extend(params.into_iter().filter(|(key, _)| key != fields::CMD));
        outgoing.insert(fields::VERSION, API_VERSION);
        outgoing.insert(fields::FORMAT, RESPONSE_FORMAT);
        outgoing.insert(fields::KEY, self.credentials.public_key());
        outgoing
    }

    async fn send_signed(&self, request: SignedRequest) -> Result<Option<Value>, ClientError> {
        let mut url = self.endpoint.clone();
        if self.duplicate_query {
            url.set_query(Some(&request.body));
        }

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            cmd = %request.command,
            endpoint = %self.endpoint,
            duplicate_query = self.duplicate_query,
            "Dispatching signed request"
        );

        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(HMAC_HEADER, request.signature)
            .body(request.body);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let http_response = req.send().await.map_err(|e| ClientError::Transport {
            context: "POST request",
            source: e,
        })?;

        let status = http_response.status();
        let body = http_response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport {
                context: "Failed to read response body",
                source: e,
            })?;

        if status != StatusCode::OK {
            return Err(ClientError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope =
            ResponseEnvelope::from_slice(&body).map_err(|e| ClientError::MalformedResponse {
                source: e,
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;

        Ok(envelope.into_result()?)
    }
}

/// Records the outcome of a call on the current span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "CoinPayments call failed");
        }
    }
}

/// Records the outcome of a call on the current span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use coinpayments::signing::sign;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PUBLIC_KEY: &str = "pub-key";
    const PRIVATE_KEY: &str = "priv-key";

    fn credentials() -> Credentials {
        Credentials::new(PUBLIC_KEY, PRIVATE_KEY)
    }

    fn client_for(server: &MockServer) -> CoinPaymentsClient {
        let config = ClientConfig::new(format!("{}/api.php", server.uri()));
        CoinPaymentsClient::try_new(credentials(), config).unwrap()
    }

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"error": "ok", "result": result}))
    }

    #[test]
    fn prepare_appends_universal_fields_after_caller_fields() {
        let client = CoinPaymentsClient::new(credentials());
        let params = Params::new().with("txid", "CPA 1").with("full", true);
        let request = client.prepare(Command::GetTxInfo, params).unwrap();
        assert_eq!(
            request.body,
            "cmd=get_tx_info&txid=CPA+1&full=1&version=1&format=json&key=pub-key"
        );
        assert_eq!(request.signature, sign(PRIVATE_KEY.as_bytes(), request.body.as_bytes()));
    }

    #[test]
    fn universal_fields_override_caller_values_in_place() {
        let client = CoinPaymentsClient::new(credentials());
        let params = Params::new()
            .with("key", "spoofed")
            .with("cmd", "rates")
            .with("format", "xml");
        let request = client.prepare(Command::Balances, params).unwrap();
        assert_eq!(request.body, "cmd=balances&key=pub-key&format=json&version=1");
    }

    #[test]
    fn signature_is_deterministic_and_value_sensitive() {
        let client = CoinPaymentsClient::new(credentials());
        let build = |txid: &str| {
            client
                .prepare(Command::GetTxInfo, Params::new().with("txid", txid))
                .unwrap()
                .signature
        };
        assert_eq!(build("A"), build("A"));
        assert_ne!(build("A"), build("B"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = CoinPaymentsClient::try_new(credentials(), ClientConfig::new("not a url"))
            .unwrap_err();
        assert!(matches!(err, ClientError::UrlParse { .. }));
    }

    #[tokio::test]
    async fn basic_info_end_to_end() {
        let server = MockServer::start().await;
        let body = "cmd=get_basic_info&version=1&format=json&key=pub-key";

        Mock::given(method("POST"))
            .and(path("/api.php"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(header("HMAC", sign(PRIVATE_KEY.as_bytes(), body.as_bytes()).as_str()))
            .and(query_param("cmd", "get_basic_info"))
            .and(query_param("key", PUBLIC_KEY))
            .and(body_string(body))
            .respond_with(ok(json!({"username": "u"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .execute("get_basic_info", Params::new())
            .await
            .unwrap();
        assert_eq!(result, Some(json!({"username": "u"})));
    }

    #[tokio::test]
    async fn query_duplication_can_be_disabled() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.php"))
            .and(query_param("cmd", "rates"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api.php"))
            .respond_with(ok(json!({"BTC": {}})))
            .mount(&server)
            .await;

        let config = ClientConfig::new(format!("{}/api.php", server.uri())).with_duplicate_query(false);
        let client = CoinPaymentsClient::try_new(credentials(), config).unwrap();
        let result = client.call(Command::Rates, Params::new()).await.unwrap();
        assert_eq!(result, Some(json!({"BTC": {}})));
    }

    #[tokio::test]
    async fn missing_parameter_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok(json!(null)))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("get_tx_info", Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingParameter(ref name) if name == "txid"));
    }

    #[tokio::test]
    async fn unknown_command_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok(json!(null)))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("bogus_cmd", Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownCommand(ref name) if name == "bogus_cmd"));
    }

    #[tokio::test]
    async fn remote_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "some failure"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("balances", Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Remote(ref msg) if msg == "some failure"));
    }

    #[tokio::test]
    async fn missing_result_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"ok"}"#))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .execute("get_pbn_list", Params::new())
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn non_200_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("balances", Params::new())
            .await
            .unwrap_err();
        match err {
            ClientError::HttpStatus { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_2xx_statuses_are_not_processed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_body_string(r#"{"error":"ok"}"#))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("balances", Params::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::HttpStatus { status, .. } if status == StatusCode::ACCEPTED));
    }

    #[tokio::test]
    async fn unparsable_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .execute("balances", Params::new())
            .await
            .unwrap_err();
        match err {
            ClientError::MalformedResponse { body, .. } => assert_eq!(body, "<html>nope</html>"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok(json!({})).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let config = ClientConfig::new(format!("{}/api.php", server.uri()))
            .with_timeout(Duration::from_millis(100));
        let client = CoinPaymentsClient::try_new(credentials(), config).unwrap();
        let err = client.execute("balances", Params::new()).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Reserve a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::new(format!("http://{addr}/api.php"));
        let client = CoinPaymentsClient::try_new(credentials(), config).unwrap();
        let err = client.execute("balances", Params::new()).await.unwrap_err();
        assert!(err.is_transport(), "got {err:?}");
        assert!(!err.is_timeout());
    }

    #[cfg(feature = "telemetry")]
    #[tokio::test]
    async fn unknown_command_is_logged_on_execute_span() {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = CoinPaymentsClient::new(credentials());
        let err = client.execute("bogus_cmd", Params::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownCommand(_)));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("coinpayments.execute"), "{output}");
        assert!(output.contains("unknown command: bogus_cmd"), "{output}");
    }

    #[tokio::test]
    async fn concurrent_calls_keep_their_own_parameters() {
        let server = MockServer::start().await;
        for id in ["w-1", "w-2"] {
            Mock::given(method("POST"))
                .and(query_param("id", id))
                .respond_with(ok(json!({"id": id})))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let (a, b) = tokio::join!(
            client.execute("get_withdrawal_info", Params::new().with("id", "w-1")),
            client.execute("get_withdrawal_info", Params::new().with("id", "w-2")),
        );
        assert_eq!(a.unwrap(), Some(json!({"id": "w-1"})));
        assert_eq!(b.unwrap(), Some(json!({"id": "w-2"})));
    }
}
