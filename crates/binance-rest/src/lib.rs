//! REST API client for the Binance exchange
//!
//! This crate maps every Binance REST endpoint to one async method. Requests
//! go through a small core that cleans the parameters, builds the query
//! string, signs it and turns failures into one structured error.
//!
//! # Features
//!
//! - **Spot**: Market data, wallet, margin, savings, staking, convert, BLVT, BSwap
//! - **Accounts**: Sub-accounts and the broker program
//! - **Futures**: USD-M (`fapi`) and COIN-M (`dapi`) market data and trading
//! - **Streams**: Listen key management for user data streams
//!
//! # Authentication
//!
//! Signed endpoints append `timestamp` and an HMAC-SHA256 `signature` of the
//! query string. The API key travels in the `X-MBX-APIKEY` header; the secret
//! never leaves the process.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, Credentials, LimitOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BinanceRestClient::new()?;
//!     let book = client.market().depth("BTCUSDT", &LimitOptions::builder().limit(5u32).build()).await?;
//!     println!("best bid {:?}", book.best_bid());
//!
//!     // Signed endpoints
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BinanceRestClient::with_credentials(creds)?;
//!     let balances = auth_client.usdm_trade().balance(&Default::default()).await?;
//!     println!("{balances}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Missing required arguments fail with [`RestError::MissingParameter`]
//! before any request is sent. Exchange and transport failures surface as
//! [`ApiError`]; the client never retries.

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod types;
pub mod validation;

// Re-export main types
pub use client::{BaseUrls, BinanceRestClient, ClientConfig, Clock, SystemClock};
pub use dispatch::{Dispatcher, PreparedRequest, API_KEY_HEADER};
pub use error::{ApiError, RestError, RestResult};
pub use params::{build_query_string, is_empty_value, sanitize, Params};
pub use validation::require;

// Re-export shared options and typed responses
pub use endpoints::{FilterOptions, LimitOptions, RecvWindowOptions, SignedFilterOptions};
pub use types::{AvgPrice, EmptyResponse, ListenKey, OrderBook, ServerTime};

pub use binance_auth::Credentials;
pub use binance_types::{
    ContractType, ConvertValidTime, ErrorCategory, FuturesPeriod, FuturesType, KlineInterval,
    LiquidityType, MarginTransferType, MarginType, NewOrderRespType, OrderSide, OrderType,
    PositionMarginType, PositionSide, ProductFamily, RecoveryStrategy, SideEffectType,
    TimeInForce, WorkingType,
};
