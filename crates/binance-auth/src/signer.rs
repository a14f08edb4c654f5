//! HMAC-SHA256 request signing for Binance API

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Compute `HMAC-SHA256(secret, message)` as 64 lowercase hex characters
pub fn hmac_sha256_hex(secret: &[u8], message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Request signer for authenticated Binance API calls
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign a serialized query string
    ///
    /// The input must be byte-for-byte the query sent on the wire, without
    /// the `signature` parameter. Fails before any I/O if no secret is set.
    pub fn sign(&self, query: &str) -> AuthResult<String> {
        if !self.credentials.has_secret() {
            return Err(AuthError::MissingSecret);
        }
        Ok(hmac_sha256_hex(
            self.credentials.expose_secret().as_bytes(),
            query,
        ))
    }

    /// Sign a query string and append `signature=<hex>` to it
    pub fn signed_query(&self, query: &str) -> AuthResult<String> {
        let signature = self.sign(query)?;
        if query.is_empty() {
            Ok(format!("signature={signature}"))
        } else {
            Ok(format!("{query}&signature={signature}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        // Published example for SIGNED endpoint security
        let creds = Credentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        );
        let signer = RequestSigner::new(&creds);

        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            signer.sign(query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_signature_shape() {
        let sig = hmac_sha256_hex(b"secret", "symbol=BTCUSDT&timestamp=1000");
        assert_eq!(sig.len(), 64);
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = hmac_sha256_hex(b"S", "timestamp=1700000000000");
        let b = hmac_sha256_hex(b"S", "timestamp=1700000000000");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_any_input_byte() {
        let query = "symbol=BTCUSDT&recvWindow=5000&timestamp=1700000000000";
        let base = hmac_sha256_hex(b"S", query);

        for i in 0..query.len() {
            let mut bytes = query.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
            let mutated = String::from_utf8(bytes).unwrap();
            assert_ne!(hmac_sha256_hex(b"S", &mutated), base, "collision at byte {i}");
        }

        assert_ne!(hmac_sha256_hex(b"T", query), base);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let creds = Credentials::api_key_only("key");
        let signer = RequestSigner::new(&creds);
        assert!(matches!(signer.sign("a=1"), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn test_signed_query_appends_signature_last() {
        let creds = Credentials::new("key", "secret");
        let signer = RequestSigner::new(&creds);

        let signed = signer.signed_query("a=1&timestamp=5").unwrap();
        let expected = hmac_sha256_hex(b"secret", "a=1&timestamp=5");
        assert_eq!(signed, format!("a=1&timestamp=5&signature={expected}"));
    }

    #[test]
    fn test_signed_query_on_empty_query() {
        let creds = Credentials::new("key", "secret");
        let signer = RequestSigner::new(&creds);

        let signed = signer.signed_query("").unwrap();
        assert!(signed.starts_with("signature="));
        assert!(!signed.contains('&'));
    }
}
