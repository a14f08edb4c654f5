//! Types shared by the USD-M and COIN-M futures groups
//!
//! Both products take the same order fields and batch format and differ only
//! in host and path prefix (`/fapi` vs `/dapi`).

use binance_types::{NewOrderRespType, OrderSide, OrderType, PositionSide, TimeInForce, WorkingType};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::error::{RestError, RestResult};
use crate::validation::require;

/// Orders accepted per batch request
pub const MAX_BATCH_ORDERS: usize = 5;

options! {
    /// Optional `symbol` filter (public)
    SymbolOptions {
        symbol: String,
    }
}

options! {
    /// Optional `symbol` filter (signed)
    SignedSymbolOptions {
        symbol: String,
        recv_window: u64,
    }
}

options! {
    FundingRateHistoryOptions {
        symbol: String,
        start_time: u64,
        end_time: u64,
        /// Max 1000
        limit: u32,
    }
}

options! {
    /// Optional fields of a futures order
    NewFuturesOrderOptions {
        /// Required in hedge mode
        position_side: PositionSide,
        time_in_force: TimeInForce,
        quantity: Decimal,
        /// `"true"` or `"false"`
        reduce_only: String,
        price: Decimal,
        new_client_order_id: String,
        stop_price: Decimal,
        /// `"true"` closes the whole position (STOP_MARKET / TAKE_PROFIT_MARKET)
        close_position: String,
        activation_price: Decimal,
        callback_rate: Decimal,
        working_type: WorkingType,
        /// `"TRUE"` or `"FALSE"`
        price_protect: String,
        new_order_resp_type: NewOrderRespType,
        recv_window: u64,
    }
}

options! {
    /// Identify one order by id or client id
    FuturesOrderIdOptions {
        order_id: u64,
        orig_client_order_id: String,
        recv_window: u64,
    }
}

options! {
    /// Identify up to ten orders to cancel
    CancelMultipleOrdersOptions {
        order_id_list: Vec<u64>,
        orig_client_order_id_list: Vec<String>,
        recv_window: u64,
    }
}

options! {
    ModifyPositionMarginOptions {
        position_side: PositionSide,
        recv_window: u64,
    }
}

options! {
    PositionMarginHistoryOptions {
        /// 1 add, 2 reduce
        #[serde(rename = "type")]
        change_type: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    IncomeHistoryOptions {
        symbol: String,
        /// "TRANSFER", "REALIZED_PNL", "FUNDING_FEE", "COMMISSION", ...
        income_type: String,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    ForceOrdersOptions {
        symbol: String,
        /// "LIQUIDATION" or "ADL"
        auto_close_type: String,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

/// One entry of a batch order request
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrder {
    #[builder(setter(into))]
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub position_side: Option<PositionSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub reduce_only: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub new_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub activation_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub callback_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub working_type: Option<WorkingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub price_protect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub new_order_resp_type: Option<NewOrderRespType>,
}

impl BatchOrder {
    /// Limit order with GTC time in force
    pub fn limit(symbol: impl Into<String>, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self::builder()
            .symbol(symbol)
            .side(side)
            .order_type(OrderType::Limit)
            .time_in_force(TimeInForce::Gtc)
            .quantity(quantity)
            .price(price)
            .build()
    }

    /// Market order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::builder()
            .symbol(symbol)
            .side(side)
            .order_type(OrderType::Market)
            .quantity(quantity)
            .build()
    }
}

/// Validate a batch and turn it into the `batchOrders` parameter value
///
/// Symbols are uppercased. The array is sent as compact JSON.
pub(crate) fn batch_orders_value<T: Serialize + HasSymbol>(orders: &[T]) -> RestResult<Value> {
    require("batchOrders", orders)?;
    if orders.len() > MAX_BATCH_ORDERS {
        return Err(RestError::InvalidParameter(format!(
            "batchOrders accepts at most {MAX_BATCH_ORDERS} orders, got {}",
            orders.len()
        )));
    }
    for order in orders {
        require("symbol", order.symbol())?;
    }

    let mut value =
        serde_json::to_value(orders).map_err(|e| RestError::InvalidParameter(e.to_string()))?;
    if let Value::Array(items) = &mut value {
        for item in items.iter_mut() {
            if let Some(Value::String(symbol)) = item.get_mut("symbol") {
                *symbol = symbol.to_uppercase();
            }
        }
    }
    Ok(value)
}

/// Batch entries carry the symbol they trade
pub(crate) trait HasSymbol {
    fn symbol(&self) -> &str;
}

impl HasSymbol for BatchOrder {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{build_query_string, Params};
    use rust_decimal_macros::dec;

    #[test]
    fn test_batch_order_serializes_set_fields_only() {
        let order = BatchOrder::market("btcusdt", OrderSide::Buy, dec!(0.01));
        let value = batch_orders_value(&[order]).unwrap();
        assert_eq!(
            value.to_string(),
            r#"[{"symbol":"BTCUSDT","side":"BUY","type":"MARKET","quantity":"0.01"}]"#
        );
    }

    #[test]
    fn test_batch_orders_encoded_as_json() {
        let order = BatchOrder::limit("BTCUSDT", OrderSide::Sell, dec!(1), dec!(50000));
        let params = Params::new().with("batchOrders", batch_orders_value(&[order]).unwrap());
        let query = build_query_string(&params);
        assert!(query.starts_with("batchOrders=%5B%7B%22symbol%22%3A%22BTCUSDT%22"));
        assert!(query.contains("%22timeInForce%22%3A%22GTC%22"));
    }

    #[test]
    fn test_batch_limits() {
        let empty: Vec<BatchOrder> = Vec::new();
        assert!(matches!(
            batch_orders_value(&empty),
            Err(RestError::MissingParameter("batchOrders"))
        ));

        let orders = vec![BatchOrder::market("BTCUSDT", OrderSide::Buy, dec!(1)); 6];
        assert!(matches!(
            batch_orders_value(&orders),
            Err(RestError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_batch_entry_without_symbol() {
        let order = BatchOrder::market("", OrderSide::Buy, dec!(1));
        assert!(matches!(
            batch_orders_value(&[order]),
            Err(RestError::MissingParameter("symbol"))
        ));
    }
}
