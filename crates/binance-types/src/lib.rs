//! Shared types for the Binance REST connector
//!
//! This crate provides the vocabulary shared by the auth and REST crates.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`ProductFamily`] - Spot, USD-M futures and COIN-M futures hosts
//! - [`OrderSide`], [`OrderType`], [`TimeInForce`], [`KlineInterval`] - Wire enums
//! - [`BinanceErrorCode`], [`ErrorCategory`], [`RecoveryStrategy`] - Exchange error mapping

pub mod endpoint;
pub mod enums;
pub mod error_codes;

// Re-export commonly used types
pub use endpoint::*;
pub use enums::*;
pub use error_codes::*;
