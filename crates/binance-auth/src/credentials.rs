//! API credentials for Binance
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};

/// Environment variable holding the API key
pub(crate) const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Environment variable holding the API secret
pub(crate) const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret never appears in a URL, query string or log line; only its
/// HMAC digest does.
#[derive(Clone)]
pub struct Credentials {
    /// API key (public, sent as `X-MBX-APIKEY`)
    api_key: String,
    /// API secret (zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials carrying only an API key
    ///
    /// Enough for public and `USER_STREAM` endpoints, which send the key for
    /// attribution but are not signed. Signed requests will fail with
    /// [`AuthError::MissingSecret`].
    pub fn api_key_only(api_key: impl Into<String>) -> Self {
        Self::new(api_key, String::new())
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(format!("{API_KEY_ENV} is empty")));
        }

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Check whether secret material is present
    pub fn has_secret(&self) -> bool {
        !self.api_secret.expose_secret().is_empty()
    }

    /// Expose the secret for signing
    ///
    /// Only the signer should call this. Never log the return value.
    pub(crate) fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", self.api_key.chars().take(8).collect::<String>()),
            )
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key", "super_secret_value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super_secret_value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api"));
    }

    #[test]
    fn test_api_key_only_has_no_secret() {
        let creds = Credentials::api_key_only("key");
        assert_eq!(creds.api_key(), "key");
        assert!(!creds.has_secret());
    }

    #[test]
    fn test_short_api_key_debug_does_not_panic() {
        let creds = Credentials::new("k", "s");
        assert!(format!("{:?}", creds).contains("k..."));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("key", "secret");
        let cloned = creds.clone();
        assert_eq!(cloned.expose_secret(), "secret");
    }
}
