//! Binance API error code mapping with recovery hints
//!
//! Binance reports failures as `{"code": -1121, "msg": "Invalid symbol."}`.
//! This module classifies the numeric codes so callers can decide how to react.
//! The connector itself never retries; a [`RecoveryStrategy`] is only a hint.

use std::time::Duration;

/// Recovery strategy for handling API errors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Re-synchronize the local clock with server time, then retry
    ResyncClock,
    /// Create a new listen key
    RenewListenKey,
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient service errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(
            self,
            Self::Backoff { .. } | Self::Retry { .. } | Self::ResyncClock | Self::RenewListenKey
        )
    }
}

/// Binance error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 10xx server and network issues
    Server,
    /// Request weight or order rate exceeded
    RateLimit,
    /// Timestamp outside recvWindow or ahead of server time
    Timestamp,
    /// API key, signature or permission problems
    Authentication,
    /// 11xx request parameter issues
    Request,
    /// 20xx order placement or cancellation rejected
    Order,
    /// Listen key missing or expired
    ListenKey,
    /// Unknown error category
    Unknown,
}

/// Known Binance API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinanceErrorCode {
    // === 10xx General server or network issues ===
    /// -1000 An unknown error occurred while processing the request
    Unknown,
    /// -1001 Internal error; unable to process your request
    Disconnected,
    /// -1002 You are not authorized to execute this request
    Unauthorized,
    /// -1003 Too many requests
    TooManyRequests,
    /// -1006 Unexpected response from the message bus
    UnexpectedResponse,
    /// -1007 Timeout waiting for response from backend server
    Timeout,
    /// -1014 Unsupported order combination
    UnknownOrderComposition,
    /// -1015 Too many new orders
    TooManyOrders,
    /// -1016 This service is no longer available
    ServiceShuttingDown,
    /// -1020 This operation is not supported
    UnsupportedOperation,
    /// -1021 Timestamp for this request is outside of the recvWindow
    InvalidTimestamp,
    /// -1022 Signature for this request is not valid
    InvalidSignature,

    // === 11xx Request issues ===
    /// -1100 Illegal characters found in a parameter
    IllegalChars,
    /// -1101 Too many parameters sent for this endpoint
    TooManyParameters,
    /// -1102 A mandatory parameter was not sent, was empty/null, or malformed
    MandatoryParamEmptyOrMalformed,
    /// -1103 An unknown parameter was sent
    UnknownParam,
    /// -1104 Not all sent parameters were read
    UnreadParameters,
    /// -1105 A parameter was empty
    ParamEmpty,
    /// -1106 A parameter was sent when not required
    ParamNotRequired,
    /// -1111 Precision is over the maximum defined for this asset
    BadPrecision,
    /// -1115 Invalid timeInForce
    InvalidTimeInForce,
    /// -1116 Invalid orderType
    InvalidOrderType,
    /// -1117 Invalid side
    InvalidSide,
    /// -1120 Invalid interval
    BadInterval,
    /// -1121 Invalid symbol
    BadSymbol,
    /// -1125 This listenKey does not exist
    InvalidListenKey,
    /// -1127 Lookup interval is too big
    LookupIntervalTooBig,
    /// -1128 Combination of optional parameters invalid
    OptionalParamsBadCombo,
    /// -1130 Invalid data sent for a parameter
    InvalidParameter,

    // === 20xx Processing issues ===
    /// -2010 New order rejected
    NewOrderRejected,
    /// -2011 Cancel rejected
    CancelRejected,
    /// -2013 Order does not exist
    NoSuchOrder,
    /// -2014 API-key format invalid
    BadApiKeyFormat,
    /// -2015 Invalid API-key, IP, or permissions for action
    RejectedApiKey,
    /// -2019 Margin is insufficient
    MarginInsufficient,
}

impl BinanceErrorCode {
    /// Look up a numeric error code
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            -1000 => Self::Unknown,
            -1001 => Self::Disconnected,
            -1002 => Self::Unauthorized,
            -1003 => Self::TooManyRequests,
            -1006 => Self::UnexpectedResponse,
            -1007 => Self::Timeout,
            -1014 => Self::UnknownOrderComposition,
            -1015 => Self::TooManyOrders,
            -1016 => Self::ServiceShuttingDown,
            -1020 => Self::UnsupportedOperation,
            -1021 => Self::InvalidTimestamp,
            -1022 => Self::InvalidSignature,
            -1100 => Self::IllegalChars,
            -1101 => Self::TooManyParameters,
            -1102 => Self::MandatoryParamEmptyOrMalformed,
            -1103 => Self::UnknownParam,
            -1104 => Self::UnreadParameters,
            -1105 => Self::ParamEmpty,
            -1106 => Self::ParamNotRequired,
            -1111 => Self::BadPrecision,
            -1115 => Self::InvalidTimeInForce,
            -1116 => Self::InvalidOrderType,
            -1117 => Self::InvalidSide,
            -1120 => Self::BadInterval,
            -1121 => Self::BadSymbol,
            -1125 => Self::InvalidListenKey,
            -1127 => Self::LookupIntervalTooBig,
            -1128 => Self::OptionalParamsBadCombo,
            -1130 => Self::InvalidParameter,
            -2010 => Self::NewOrderRejected,
            -2011 => Self::CancelRejected,
            -2013 => Self::NoSuchOrder,
            -2014 => Self::BadApiKeyFormat,
            -2015 => Self::RejectedApiKey,
            -2019 => Self::MarginInsufficient,
            _ => return None,
        })
    }

    /// Numeric code as reported by the exchange
    pub fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1000,
            Self::Disconnected => -1001,
            Self::Unauthorized => -1002,
            Self::TooManyRequests => -1003,
            Self::UnexpectedResponse => -1006,
            Self::Timeout => -1007,
            Self::UnknownOrderComposition => -1014,
            Self::TooManyOrders => -1015,
            Self::ServiceShuttingDown => -1016,
            Self::UnsupportedOperation => -1020,
            Self::InvalidTimestamp => -1021,
            Self::InvalidSignature => -1022,
            Self::IllegalChars => -1100,
            Self::TooManyParameters => -1101,
            Self::MandatoryParamEmptyOrMalformed => -1102,
            Self::UnknownParam => -1103,
            Self::UnreadParameters => -1104,
            Self::ParamEmpty => -1105,
            Self::ParamNotRequired => -1106,
            Self::BadPrecision => -1111,
            Self::InvalidTimeInForce => -1115,
            Self::InvalidOrderType => -1116,
            Self::InvalidSide => -1117,
            Self::BadInterval => -1120,
            Self::BadSymbol => -1121,
            Self::InvalidListenKey => -1125,
            Self::LookupIntervalTooBig => -1127,
            Self::OptionalParamsBadCombo => -1128,
            Self::InvalidParameter => -1130,
            Self::NewOrderRejected => -2010,
            Self::CancelRejected => -2011,
            Self::NoSuchOrder => -2013,
            Self::BadApiKeyFormat => -2014,
            Self::RejectedApiKey => -2015,
            Self::MarginInsufficient => -2019,
        }
    }

    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TooManyRequests | Self::TooManyOrders => ErrorCategory::RateLimit,
            Self::InvalidTimestamp => ErrorCategory::Timestamp,
            Self::Unauthorized
            | Self::InvalidSignature
            | Self::BadApiKeyFormat
            | Self::RejectedApiKey => ErrorCategory::Authentication,
            Self::InvalidListenKey => ErrorCategory::ListenKey,
            Self::NewOrderRejected
            | Self::CancelRejected
            | Self::NoSuchOrder
            | Self::MarginInsufficient => ErrorCategory::Order,
            Self::Unknown
            | Self::Disconnected
            | Self::UnexpectedResponse
            | Self::Timeout
            | Self::ServiceShuttingDown => ErrorCategory::Server,
            Self::UnknownOrderComposition
            | Self::UnsupportedOperation
            | Self::IllegalChars
            | Self::TooManyParameters
            | Self::MandatoryParamEmptyOrMalformed
            | Self::UnknownParam
            | Self::UnreadParameters
            | Self::ParamEmpty
            | Self::ParamNotRequired
            | Self::BadPrecision
            | Self::InvalidTimeInForce
            | Self::InvalidOrderType
            | Self::InvalidSide
            | Self::BadInterval
            | Self::BadSymbol
            | Self::LookupIntervalTooBig
            | Self::OptionalParamsBadCombo
            | Self::InvalidParameter => ErrorCategory::Request,
        }
    }

    /// Get the recovery strategy for this error
    ///
    /// Retrying a signed write (order placement, withdrawal) after a server-side
    /// timeout may duplicate its effect; callers should query state first.
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::TooManyRequests | Self::TooManyOrders => RecoveryStrategy::rate_limit_backoff(),
            Self::Unknown | Self::Disconnected | Self::UnexpectedResponse | Self::Timeout => {
                RecoveryStrategy::service_retry()
            }
            Self::InvalidTimestamp => RecoveryStrategy::ResyncClock,
            Self::InvalidListenKey => RecoveryStrategy::RenewListenKey,
            Self::MarginInsufficient => RecoveryStrategy::UserAction {
                message: "Add margin or reduce position size",
            },
            Self::ServiceShuttingDown => RecoveryStrategy::Manual,
            _ => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        self.category() == ErrorCategory::RateLimit
    }

    /// Check if this is an authentication error
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }
}

/// Classify a raw numeric code, falling back to [`ErrorCategory::Unknown`]
pub fn categorize(code: i64) -> ErrorCategory {
    BinanceErrorCode::from_code(code)
        .map(|c| c.category())
        .unwrap_or(ErrorCategory::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_for_known_codes() {
        for code in [-1000, -1003, -1021, -1022, -1121, -1125, -2010, -2015, -2019] {
            let parsed = BinanceErrorCode::from_code(code).unwrap();
            assert_eq!(parsed.code(), code);
        }
    }

    #[test]
    fn test_rate_limit_classification() {
        let err = BinanceErrorCode::from_code(-1003).unwrap();
        assert!(err.is_rate_limit());
        assert!(err.recovery_strategy().allows_retry());
        assert_eq!(
            err.recovery_strategy().initial_delay(),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_signature_error_is_fatal() {
        let err = BinanceErrorCode::InvalidSignature;
        assert!(err.is_auth_error());
        assert_eq!(err.recovery_strategy(), RecoveryStrategy::Fatal);
        assert!(!err.recovery_strategy().allows_retry());
    }

    #[test]
    fn test_timestamp_error_suggests_resync() {
        assert_eq!(categorize(-1021), ErrorCategory::Timestamp);
        assert_eq!(
            BinanceErrorCode::InvalidTimestamp.recovery_strategy(),
            RecoveryStrategy::ResyncClock
        );
    }

    #[test]
    fn test_unknown_code() {
        assert!(BinanceErrorCode::from_code(-9999).is_none());
        assert_eq!(categorize(-9999), ErrorCategory::Unknown);
    }

    #[test]
    fn test_bad_symbol_is_request_error() {
        assert_eq!(categorize(-1121), ErrorCategory::Request);
    }
}
