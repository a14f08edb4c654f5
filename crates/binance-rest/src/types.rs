//! Typed responses for the handful of endpoints with a stable shape
//!
//! Everything else is returned as [`serde_json::Value`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response of endpoints that return `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Server time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Milliseconds since the Unix epoch
    pub server_time: u64,
}

/// User data stream key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    pub listen_key: String,
}

/// Current average price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgPrice {
    /// Averaging window in minutes
    pub mins: u64,
    pub price: Decimal,
}

/// Order book snapshot
///
/// Levels are `(price, quantity)`, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: u64,
    pub bids: Vec<(Decimal, Decimal)>,
    pub asks: Vec<(Decimal, Decimal)>,
}

impl OrderBook {
    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    /// Spread between best ask and best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Mid price
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()? + self.best_bid()?) / Decimal::TWO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_book_parsing() {
        let json = r#"{
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000"]],
            "asks": [["4.00000200", "12.00000000"]]
        }"#;

        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.last_update_id, 1027024);
        assert_eq!(book.best_bid(), Some(dec!(4.00000000)));
        assert_eq!(book.spread(), Some(dec!(0.00000200)));
        assert_eq!(book.mid_price(), Some(dec!(4.000001)));
    }

    #[test]
    fn test_futures_depth_ignores_extra_fields() {
        let json = r#"{"lastUpdateId":1,"E":1589436922972,"T":1589436922959,"bids":[],"asks":[]}"#;
        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_avg_price_parsing() {
        let price: AvgPrice = serde_json::from_str(r#"{"mins":5,"price":"9.35751834"}"#).unwrap();
        assert_eq!(price.mins, 5);
        assert_eq!(price.price, dec!(9.35751834));
    }

    #[test]
    fn test_server_time_and_listen_key() {
        let time: ServerTime = serde_json::from_str(r#"{"serverTime":1499827319559}"#).unwrap();
        assert_eq!(time.server_time, 1499827319559);

        let key: ListenKey =
            serde_json::from_str(r#"{"listenKey":"pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1"}"#)
                .unwrap();
        assert!(key.listen_key.starts_with("pqia91"));
    }
}
