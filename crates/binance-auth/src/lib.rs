//! Credentials and request signing for the Binance API
//!
//! Signed (`TRADE`, `USER_DATA`, ...) endpoints require an HMAC-SHA256
//! signature over the exact query string sent on the wire. This crate holds
//! the API key and secret and produces that signature.
//!
//! # Example
//!
//! ```
//! use binance_auth::{Credentials, RequestSigner};
//!
//! let creds = Credentials::new("my-api-key", "my-secret");
//! let signer = RequestSigner::new(&creds);
//!
//! let signed = signer.signed_query("symbol=BTCUSDT&timestamp=1700000000000").unwrap();
//! assert!(signed.starts_with("symbol=BTCUSDT&timestamp=1700000000000&signature="));
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use signer::{hmac_sha256_hex, RequestSigner};
