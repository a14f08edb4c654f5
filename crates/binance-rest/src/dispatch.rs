//! Request preparation and dispatch
//!
//! [`Dispatcher`] is the single path every endpoint wrapper goes through.
//! Public requests carry sanitized parameters in the query string. Signed
//! requests additionally get a `timestamp`, are serialized once, and that
//! exact string is signed with HMAC-SHA256; the hex digest is appended as the
//! last parameter.

use binance_auth::{Credentials, RequestSigner};
use binance_types::ProductFamily;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::ClientConfig;
use crate::error::{ApiError, RestError, RestResult};
use crate::params::{build_query_string, sanitize, Params};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Longest body excerpt quoted in parse errors
const BODY_EXCERPT_LEN: usize = 256;

/// A fully built request, ready to send
///
/// The secret never appears here; only its HMAC digest in `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(&'static str, String)>,
}

impl PreparedRequest {
    /// Value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Query string portion of the URL, without the `?`
    pub fn query(&self) -> &str {
        self.url.split_once('?').map_or("", |(_, q)| q)
    }
}

/// Dispatches public and signed requests for one product family
///
/// Cheap to copy. Per-call overrides for credentials or host are applied with
/// [`Dispatcher::with_credentials`] and [`Dispatcher::with_base_url`] and
/// do not affect the client.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    http_client: &'a Client,
    config: &'a ClientConfig,
    family: ProductFamily,
    credentials: Option<&'a Credentials>,
    base_url: Option<&'a str>,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(http_client: &'a Client, config: &'a ClientConfig, family: ProductFamily) -> Self {
        Self {
            http_client,
            config,
            family,
            credentials: None,
            base_url: None,
        }
    }

    /// Use these credentials instead of the client's
    pub fn with_credentials(mut self, credentials: &'a Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use this host instead of the configured one
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Product family this dispatcher targets
    pub fn family(&self) -> ProductFamily {
        self.family
    }

    /// Host requests are sent to, without trailing slash
    pub fn base_url(&self) -> &'a str {
        self.base_url
            .unwrap_or_else(|| self.config.base_urls.get(self.family))
            .trim_end_matches('/')
    }

    fn credentials(&self) -> Option<&'a Credentials> {
        self.credentials.or(self.config.credentials.as_ref())
    }

    fn common_headers(&self, api_key: &str) -> Vec<(&'static str, String)> {
        vec![
            (API_KEY_HEADER, api_key.to_string()),
            ("User-Agent", self.config.user_agent().to_string()),
        ]
    }

    /// Build a public request
    ///
    /// `?` is only added when at least one parameter survives sanitization.
    /// The API key header is sent when credentials are configured and left
    /// empty otherwise.
    pub fn prepare_public(&self, method: Method, path: &str, params: &Params) -> PreparedRequest {
        let query = build_query_string(&sanitize(params));
        let mut url = format!("{}{}", self.base_url(), path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let api_key = self.credentials().map(Credentials::api_key).unwrap_or("");

        PreparedRequest {
            method,
            url,
            headers: self.common_headers(api_key),
        }
    }

    /// Build a request that carries the API key but no signature
    ///
    /// Fails with [`RestError::AuthRequired`] when no API key is configured.
    pub fn prepare_keyed(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> RestResult<PreparedRequest> {
        match self.credentials() {
            Some(credentials) if !credentials.api_key().trim().is_empty() => {
                Ok(self.prepare_public(method, path, params))
            }
            _ => Err(RestError::AuthRequired),
        }
    }

    /// Build a signed request at the given timestamp
    ///
    /// Sanitizes `params`, adds `recvWindow` from the config when the caller
    /// did not set one, sets `timestamp`, serializes, signs the serialized
    /// string and appends `signature` last. Fails before any I/O when
    /// credentials or the secret are missing.
    pub fn prepare_signed(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        timestamp_ms: u64,
    ) -> RestResult<PreparedRequest> {
        let credentials = self.credentials().ok_or(RestError::AuthRequired)?;
        let signer = RequestSigner::new(credentials);

        let mut params = sanitize(params);
        if let Some(recv_window) = self.config.recv_window {
            if !params.contains_key("recvWindow") {
                params.insert("recvWindow", recv_window);
            }
        }
        params.insert("timestamp", timestamp_ms);

        let query = build_query_string(&params);
        let signed_query = signer.signed_query(&query)?;

        let mut headers = self.common_headers(signer.api_key());
        headers.push(("Content-Type", "application/json".to_string()));

        Ok(PreparedRequest {
            method,
            url: format!("{}{}?{}", self.base_url(), path, signed_query),
            headers,
        })
    }

    /// Send a public request and decode the response
    pub async fn public<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> RestResult<T> {
        let request = self.prepare_public(method, path, &params);
        debug!(
            family = %self.family,
            method = %request.method,
            path,
            params = params.len(),
            "Dispatching public request"
        );
        self.execute(request).await
    }

    /// Send an API-key request (listen keys) and decode the response
    pub async fn keyed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> RestResult<T> {
        let request = self.prepare_keyed(method, path, &params)?;
        debug!(
            family = %self.family,
            method = %request.method,
            path,
            "Dispatching api-key request"
        );
        self.execute(request).await
    }

    /// Sign and send a request and decode the response
    pub async fn signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> RestResult<T> {
        let timestamp = self.config.clock.now_millis();
        let request = self.prepare_signed(method, path, &params, timestamp)?;
        debug!(
            family = %self.family,
            method = %request.method,
            path,
            timestamp,
            "Dispatching signed request"
        );
        self.execute(request).await
    }

    /// Send a public request whose parameters all come from an options struct
    pub async fn public_options<T: DeserializeOwned, O: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        options: &O,
    ) -> RestResult<T> {
        let params = Params::new().merge_options(options)?;
        self.public(method, path, params).await
    }

    /// Sign and send a request whose parameters all come from an options struct
    pub async fn signed_options<T: DeserializeOwned, O: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        options: &O,
    ) -> RestResult<T> {
        let params = Params::new().merge_options(options)?;
        self.signed(method, path, params).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: PreparedRequest) -> RestResult<T> {
        let mut builder = self.http_client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            warn!(family = %self.family, error = %e, "Request failed without response");
            ApiError::network(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let mut err = ApiError::network(e);
            err.status = Some(status.as_u16());
            err
        })?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            warn!(
                family = %self.family,
                status = status.as_u16(),
                code = ?err.code,
                message = %err.message,
                "Request rejected"
            );
            return Err(err.into());
        }

        decode_body(&body)
    }
}

/// Decode a 2xx body; an empty body decodes as `{}`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        RestError::Parse(format!("{e}: {excerpt}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Clock;
    use crate::types::EmptyResponse;
    use binance_auth::hmac_sha256_hex;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[derive(Debug)]
    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            self.0
        }
    }

    fn config(credentials: Option<Credentials>) -> ClientConfig {
        ClientConfig {
            credentials,
            clock: Arc::new(FixedClock(1_700_000_000_000)),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_signed_query_layout() {
        let http = Client::new();
        let config = config(Some(Credentials::new("K", "S")));
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let params = Params::new().with("symbol", "BTCUSDT").with("limit", 5);
        let request = dispatcher
            .prepare_signed(Method::GET, "/api/v3/myTrades", &params, 1_700_000_000_000)
            .unwrap();

        let unsigned = "symbol=BTCUSDT&limit=5&timestamp=1700000000000";
        let expected = format!(
            "https://api.binance.com/api/v3/myTrades?{unsigned}&signature={}",
            hmac_sha256_hex(b"S", unsigned)
        );
        assert_eq!(request.url, expected);
        assert_eq!(request.header("x-mbx-apikey"), Some("K"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert!(!request.url.contains("=S&") && !request.url.ends_with("=S"));
    }

    #[test]
    fn test_signed_drops_empty_params_before_signing() {
        let http = Client::new();
        let config = config(Some(Credentials::new("K", "S")));
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let params = Params::new()
            .with("symbol", "BTCUSDT")
            .with("fromId", Value::Null)
            .with("note", " ");
        let request = dispatcher
            .prepare_signed(Method::GET, "/x", &params, 42)
            .unwrap();
        assert!(request.query().starts_with("symbol=BTCUSDT&timestamp=42&signature="));
    }

    #[test]
    fn test_recv_window_injection() {
        let http = Client::new();
        let mut config = config(Some(Credentials::new("K", "S")));
        config.recv_window = Some(5000);
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let request = dispatcher
            .prepare_signed(Method::GET, "/x", &Params::new(), 1)
            .unwrap();
        assert!(request.query().starts_with("recvWindow=5000&timestamp=1&signature="));

        let explicit = Params::new().with("recvWindow", 10000);
        let request = dispatcher
            .prepare_signed(Method::GET, "/x", &explicit, 1)
            .unwrap();
        assert!(request.query().starts_with("recvWindow=10000&timestamp=1&"));
    }

    #[test]
    fn test_signed_without_credentials() {
        let http = Client::new();
        let config = config(None);
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let err = dispatcher
            .prepare_signed(Method::GET, "/x", &Params::new(), 1)
            .unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));
    }

    #[test]
    fn test_signed_without_secret() {
        let http = Client::new();
        let config = config(Some(Credentials::api_key_only("K")));
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let err = dispatcher
            .prepare_signed(Method::GET, "/x", &Params::new(), 1)
            .unwrap_err();
        assert!(matches!(err, RestError::Auth(binance_auth::AuthError::MissingSecret)));
    }

    #[test]
    fn test_public_without_params_has_no_question_mark() {
        let http = Client::new();
        let config = config(None);
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::Spot);

        let request = dispatcher.prepare_public(Method::GET, "/api/v3/ping", &Params::new());
        assert_eq!(request.url, "https://api.binance.com/api/v3/ping");
        assert_eq!(request.header("X-MBX-APIKEY"), Some(""));
        assert_eq!(request.header("content-type"), None);

        let blank = Params::new().with("symbol", "");
        let request = dispatcher.prepare_public(Method::GET, "/api/v3/ping", &blank);
        assert!(!request.url.contains('?'));
    }

    #[test]
    fn test_keyed_requires_api_key() {
        let http = Client::new();
        let config = config(None);
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::UsdMFutures);
        let err = dispatcher
            .prepare_keyed(Method::POST, "/fapi/v1/listenKey", &Params::new())
            .unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));

        let blank = Credentials::api_key_only("  ");
        let err = dispatcher
            .with_credentials(&blank)
            .prepare_keyed(Method::POST, "/fapi/v1/listenKey", &Params::new())
            .unwrap_err();
        assert!(matches!(err, RestError::AuthRequired));
    }

    #[test]
    fn test_keyed_sends_key_without_signature() {
        let http = Client::new();
        let config = config(Some(Credentials::api_key_only("K")));
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::UsdMFutures);

        let request = dispatcher
            .prepare_keyed(Method::POST, "/fapi/v1/listenKey", &Params::new())
            .unwrap();
        assert_eq!(request.url, "https://fapi.binance.com/fapi/v1/listenKey");
        assert_eq!(request.header("X-MBX-APIKEY"), Some("K"));
    }

    #[test]
    fn test_per_call_overrides() {
        let http = Client::new();
        let config = config(Some(Credentials::new("K", "S")));
        let other = Credentials::new("K2", "S2");
        let dispatcher = Dispatcher::new(&http, &config, ProductFamily::UsdMFutures)
            .with_credentials(&other)
            .with_base_url("http://127.0.0.1:9000/");

        let request = dispatcher
            .prepare_signed(Method::POST, "/fapi/v1/order", &Params::new(), 7)
            .unwrap();
        let expected_sig = hmac_sha256_hex(b"S2", "timestamp=7");
        assert_eq!(
            request.url,
            format!("http://127.0.0.1:9000/fapi/v1/order?timestamp=7&signature={expected_sig}")
        );
        assert_eq!(request.header("X-MBX-APIKEY"), Some("K2"));
    }

    #[test]
    fn test_family_hosts() {
        let http = Client::new();
        let config = config(None);
        for family in ProductFamily::ALL {
            let dispatcher = Dispatcher::new(&http, &config, family);
            assert_eq!(dispatcher.base_url(), family.default_base_url());
        }
    }

    #[test]
    fn test_decode_empty_body() {
        let decoded: EmptyResponse = decode_body("").unwrap();
        assert_eq!(decoded, EmptyResponse {});
        let value: Value = decode_body("  ").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_decode_garbage_is_parse_error() {
        let err = decode_body::<Value>("not json").unwrap_err();
        assert!(matches!(err, RestError::Parse(_)));
    }
}
