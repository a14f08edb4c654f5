//! Shared helpers for integration tests against a mock server

#![allow(dead_code)]

use binance_rest::{BaseUrls, BinanceRestClient, ClientConfig, Clock, Credentials};

/// Timestamp every signed test request carries
pub const TEST_TIMESTAMP: u64 = 1_700_000_000_000;

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::default()
        .with_base_urls(BaseUrls::uniform(base_url))
        .with_clock(FixedClock(TEST_TIMESTAMP))
        .with_timeout_secs(5)
}

/// Unauthenticated client pointed at `base_url`
pub fn public_client(base_url: &str) -> BinanceRestClient {
    BinanceRestClient::with_config(test_config(base_url)).unwrap()
}

/// Client with key `K` and secret `S` pointed at `base_url`
pub fn signed_client(base_url: &str) -> BinanceRestClient {
    BinanceRestClient::with_config(test_config(base_url).with_credentials(Credentials::new("K", "S")))
        .unwrap()
}

/// `unsigned&signature=<hex>` as the client should produce it for secret `S`
pub fn signed_query(unsigned: &str) -> String {
    format!(
        "{unsigned}&signature={}",
        binance_auth::hmac_sha256_hex(b"S", unsigned)
    )
}
