//! Order, interval and account enums as spelled on the wire

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Order types across spot, margin and futures
///
/// Not every type is accepted by every product; the exchange rejects
/// unsupported combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Spot stop-loss (triggers a market order)
    StopLoss,
    /// Spot stop-loss limit
    StopLossLimit,
    /// Spot take-profit (triggers a market order)
    TakeProfit,
    /// Spot take-profit limit
    TakeProfitLimit,
    /// Spot post-only limit
    LimitMaker,
    /// Futures stop limit
    Stop,
    /// Futures stop market
    StopMarket,
    /// Futures take-profit market
    TakeProfitMarket,
    /// Futures trailing stop
    TrailingStopMarket,
}

impl OrderType {
    /// Returns the order type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::StopLoss => "STOP_LOSS",
            Self::StopLossLimit => "STOP_LOSS_LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            Self::LimitMaker => "LIMIT_MAKER",
            Self::Stop => "STOP",
            Self::StopMarket => "STOP_MARKET",
            Self::TakeProfitMarket => "TAKE_PROFIT_MARKET",
            Self::TrailingStopMarket => "TRAILING_STOP_MARKET",
        }
    }

    /// Returns true if the order type requires a limit price
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            Self::Limit
                | Self::StopLossLimit
                | Self::TakeProfitLimit
                | Self::LimitMaker
                | Self::Stop
        )
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
    /// Good till crossing (futures post-only)
    Gtx,
}

impl TimeInForce {
    /// Returns the time in force as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
            Self::Gtx => "GTX",
        }
    }
}

/// Kline/candlestick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KlineInterval {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl KlineInterval {
    /// Returns the interval as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1m",
            Self::Minute3 => "3m",
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour8 => "8h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Day3 => "3d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }
}

/// Futures contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    /// Perpetual swap
    Perpetual,
    /// Current quarter delivery
    CurrentQuarter,
    /// Next quarter delivery
    NextQuarter,
}

impl ContractType {
    /// Returns the contract type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perpetual => "PERPETUAL",
            Self::CurrentQuarter => "CURRENT_QUARTER",
            Self::NextQuarter => "NEXT_QUARTER",
        }
    }
}

/// Period for futures statistics endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuturesPeriod {
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
}

impl FuturesPeriod {
    /// Returns the period as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute5 => "5m",
            Self::Minute15 => "15m",
            Self::Minute30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
        }
    }
}

/// Futures margin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarginType {
    Isolated,
    Crossed,
}

impl MarginType {
    /// Returns the margin type as used in API parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isolated => "ISOLATED",
            Self::Crossed => "CROSSED",
        }
    }
}

/// Futures position side (hedge mode uses LONG/SHORT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    #[default]
    Both,
    Long,
    Short,
}

/// Price used to trigger futures conditional orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkingType {
    MarkPrice,
    ContractPrice,
}

/// Amount of detail returned when an order is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NewOrderRespType {
    Ack,
    Result,
    Full,
}

/// Margin order side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SideEffectType {
    NoSideEffect,
    MarginBuy,
    AutoRepay,
}

/// Quote validity for convert requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConvertValidTime {
    #[default]
    #[serde(rename = "10s")]
    Seconds10,
    #[serde(rename = "30s")]
    Seconds30,
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "2m")]
    Minute2,
}

/// Direction of a cross-margin transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginTransferType {
    /// Spot account to margin account
    SpotToMargin = 1,
    /// Margin account to spot account
    MarginToSpot = 2,
}

impl MarginTransferType {
    /// Returns the numeric code sent to the exchange
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Direction of an isolated position margin adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMarginType {
    /// Add margin to the position
    Add = 1,
    /// Reduce margin from the position
    Reduce = 2,
}

impl PositionMarginType {
    /// Returns the numeric code sent to the exchange
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Futures account family of a sub-account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuturesType {
    /// USD-M futures
    UsdMargined = 1,
    /// COIN-M futures
    CoinMargined = 2,
}

impl FuturesType {
    /// Returns the numeric code sent to the exchange
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// How liquidity is added to or removed from a swap pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LiquidityType {
    /// One asset of the pool
    #[default]
    Single,
    /// Both assets of the pool
    Combination,
}

impl LiquidityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Combination => "COMBINATION",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    OrderSide,
    OrderType,
    TimeInForce,
    KlineInterval,
    ContractType,
    FuturesPeriod,
    MarginType,
    LiquidityType,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_serde_matches_as_str() {
        let side = serde_json::to_string(&OrderSide::Sell).unwrap();
        assert_eq!(side, "\"SELL\"");

        let order_type = serde_json::to_string(&OrderType::TrailingStopMarket).unwrap();
        assert_eq!(order_type, format!("\"{}\"", OrderType::TrailingStopMarket.as_str()));

        let interval = serde_json::to_string(&KlineInterval::Month1).unwrap();
        assert_eq!(interval, "\"1M\"");

        let period = serde_json::to_string(&FuturesPeriod::Hour12).unwrap();
        assert_eq!(period, format!("\"{}\"", FuturesPeriod::Hour12));
    }

    #[test]
    fn test_position_and_working_type_wire_names() {
        assert_eq!(serde_json::to_string(&PositionSide::Long).unwrap(), "\"LONG\"");
        assert_eq!(
            serde_json::to_string(&WorkingType::MarkPrice).unwrap(),
            "\"MARK_PRICE\""
        );
        assert_eq!(
            serde_json::to_string(&SideEffectType::AutoRepay).unwrap(),
            "\"AUTO_REPAY\""
        );
        assert_eq!(serde_json::to_string(&ConvertValidTime::default()).unwrap(), "\"10s\"");
    }

    #[test]
    fn test_liquidity_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&LiquidityType::Combination).unwrap(),
            format!("\"{}\"", LiquidityType::Combination)
        );
        assert_eq!(LiquidityType::default().as_str(), "SINGLE");
    }

    #[test]
    fn test_requires_price() {
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Market.requires_price());
        assert!(!OrderType::StopMarket.requires_price());
    }

    #[test]
    fn test_numeric_codes() {
        assert_eq!(MarginTransferType::MarginToSpot.as_u8(), 2);
        assert_eq!(PositionMarginType::Add.as_u8(), 1);
        assert_eq!(FuturesType::CoinMargined.as_u8(), 2);
    }
}
