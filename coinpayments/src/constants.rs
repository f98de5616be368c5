//! Wire constants of the CoinPayments merchant API.

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.coinpayments.net/api.php";

/// API protocol version sent in the `version` field.
pub const API_VERSION: u32 = 1;

/// Response format sent in the `format` field.
pub const RESPONSE_FORMAT: &str = "json";

/// Envelope `error` value reported on success.
pub const SUCCESS_MARKER: &str = "ok";

/// Header carrying the request signature.
pub const HMAC_HEADER: &str = "HMAC";

/// Content type of the request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Field names injected into every request.
pub mod fields {
    /// Command name.
    pub const CMD: &str = "cmd";
    /// Protocol version.
    pub const VERSION: &str = "version";
    /// Response format.
    pub const FORMAT: &str = "format";
    /// Public key identifier.
    pub const KEY: &str = "key";
}
