//! Error types for REST API operations

use std::fmt;

use binance_auth::AuthError;
use binance_types::error_codes::{categorize, BinanceErrorCode, ErrorCategory, RecoveryStrategy};
use serde_json::Value;

/// Fallback message when the server gave no `msg`
const NETWORK_ERROR: &str = "network error";

/// Normalized failure of a dispatched request
///
/// Carries the HTTP status when a response arrived, the Binance numeric
/// `code` and `msg` when the body had them, and the raw body for anything
/// else. A request that never got a response has `status == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status, absent when no response was received
    pub status: Option<u16>,
    /// Binance error code (e.g. `-1121`)
    pub code: Option<i64>,
    /// Upstream `msg`, or a network error description
    pub message: String,
    /// Response body, parsed as JSON when possible
    pub body: Option<Value>,
}

impl ApiError {
    /// Build an error from a non-2xx response
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();

        let code = parsed
            .as_ref()
            .and_then(|v| v.get("code"))
            .and_then(Value::as_i64);
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| NETWORK_ERROR.to_string());

        let body = match parsed {
            Some(value) => Some(value),
            None if body.trim().is_empty() => None,
            None => Some(Value::String(body.to_string())),
        };

        Self {
            status: Some(status),
            code,
            message,
            body,
        }
    }

    /// Build an error for a request that produced no response
    pub fn network(detail: impl fmt::Display) -> Self {
        Self {
            status: None,
            code: None,
            message: format!("{NETWORK_ERROR}: {detail}"),
            body: None,
        }
    }

    /// Check whether no response was received
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }

    /// Known error code, if the numeric code is recognized
    pub fn known_code(&self) -> Option<BinanceErrorCode> {
        self.code.and_then(BinanceErrorCode::from_code)
    }

    /// Category of the error code
    pub fn category(&self) -> ErrorCategory {
        match (self.code, self.status) {
            (Some(code), _) => categorize(code),
            (None, Some(429 | 418)) => ErrorCategory::RateLimit,
            (None, Some(s)) if s >= 500 => ErrorCategory::Server,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limited(&self) -> bool {
        self.category() == ErrorCategory::RateLimit
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        if let Some(known) = self.known_code() {
            return known.recovery_strategy();
        }
        match self.status {
            None => RecoveryStrategy::service_retry(),
            Some(429 | 418) => RecoveryStrategy::rate_limit_backoff(),
            Some(s) if s >= 500 => RecoveryStrategy::service_retry(),
            Some(_) => RecoveryStrategy::Fatal,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.code) {
            (Some(status), Some(code)) => {
                write!(f, "HTTP {status} (code {code}): {}", self.message)
            }
            (Some(status), None) => write!(f, "HTTP {status}: {}", self.message),
            (None, _) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A required argument was absent or empty; raised before any I/O
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Signed endpoint called without credentials
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential problem (e.g. no secret for a signed call)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request failed on the wire or the server rejected it
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Failed to parse a successful response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client could not be constructed
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl RestError {
    /// The normalized API error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error was raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_) | Self::InvalidParameter(_) | Self::AuthRequired | Self::Auth(_)
        )
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api(err) => err.recovery_strategy(),
            Self::MissingParameter(_)
            | Self::InvalidParameter(_)
            | Self::AuthRequired
            | Self::Auth(_)
            | Self::Config(_)
            | Self::Parse(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_rate_limited())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_with_binance_body() {
        let err = ApiError::from_response(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.code, Some(-1121));
        assert_eq!(err.message, "Invalid symbol.");
        assert_eq!(err.body, Some(json!({"code": -1121, "msg": "Invalid symbol."})));
        assert_eq!(err.category(), ErrorCategory::Request);
        assert_eq!(err.to_string(), "HTTP 400 (code -1121): Invalid symbol.");
    }

    #[test]
    fn test_from_response_without_msg() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.code, None);
        assert_eq!(err.message, "network error");
        assert_eq!(err.body, Some(json!("<html>Bad Gateway</html>")));
        assert!(err.recovery_strategy().allows_retry());
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = ApiError::from_response(404, "");
        assert_eq!(err.body, None);
        assert_eq!(err.message, "network error");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::network("connection refused");
        assert!(err.is_network());
        assert_eq!(err.code, None);
        assert!(err.message.starts_with("network error"));
        assert!(err.recovery_strategy().allows_retry());
    }

    #[test]
    fn test_rate_limit_detection() {
        let by_code = RestError::from(ApiError::from_response(
            429,
            r#"{"code":-1003,"msg":"Too many requests."}"#,
        ));
        assert!(by_code.is_rate_limited());
        assert!(by_code.is_retryable());

        let by_status = RestError::from(ApiError::from_response(429, ""));
        assert!(by_status.is_rate_limited());
    }

    #[test]
    fn test_validation_errors_are_fatal() {
        let err = RestError::MissingParameter("symbol");
        assert!(err.is_validation());
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Missing required parameter: symbol");

        assert!(RestError::AuthRequired.is_validation());
    }
}
