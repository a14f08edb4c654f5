//! COIN-M futures account and trading (`dapi` host, signed)

use binance_types::{MarginType, OrderSide, OrderType, PositionMarginType};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

use crate::dispatch::Dispatcher;
use crate::endpoints::futures::{
    batch_orders_value, BatchOrder, CancelMultipleOrdersOptions, ForceOrdersOptions,
    FuturesOrderIdOptions, HasSymbol, IncomeHistoryOptions, ModifyPositionMarginOptions,
    NewFuturesOrderOptions, PositionMarginHistoryOptions, SignedSymbolOptions,
};
use crate::endpoints::RecvWindowOptions;
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::validation::require;

options! {
    /// Order to amend and its new quantity/price
    ModifyOrderOptions {
        order_id: u64,
        orig_client_order_id: String,
        quantity: Decimal,
        price: Decimal,
        recv_window: u64,
    }
}

options! {
    OrderModifyHistoryOptions {
        order_id: u64,
        orig_client_order_id: String,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    /// Filter by contract symbol or pair
    SignedSymbolPairOptions {
        symbol: String,
        pair: String,
        recv_window: u64,
    }
}

options! {
    /// `symbol` or `pair` must be set
    CoinMAllOrdersOptions {
        symbol: String,
        pair: String,
        order_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    /// `symbol` or `pair` must be set
    CoinMTradeListOptions {
        symbol: String,
        pair: String,
        from_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    PositionRiskOptions {
        margin_asset: String,
        pair: String,
        recv_window: u64,
    }
}

options! {
    PairOptions {
        pair: String,
        recv_window: u64,
    }
}

/// One entry of a batch amend request
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BatchModifyOrder {
    #[builder(setter(into))]
    pub symbol: String,
    pub side: OrderSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub order_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub orig_client_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub price: Option<Decimal>,
}

impl HasSymbol for BatchModifyOrder {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// COIN-M trading endpoints
#[derive(Debug, Clone, Copy)]
pub struct CoinMTradeEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> CoinMTradeEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    // ========================================================================
    // Position mode
    // ========================================================================

    /// Switch between hedge mode (`true`) and one-way mode (`false`)
    #[instrument(skip(self, options))]
    pub async fn change_position_mode(
        &self,
        dual_side_position: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("dualSidePosition", dual_side_position.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/positionSide/dual", params)
            .await
    }

    /// Current position mode
    #[instrument(skip(self, options))]
    pub async fn position_mode(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/positionSide/dual", options)
            .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Place an order
    #[instrument(skip(self, options))]
    pub async fn new_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        options: &NewFuturesOrderOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("side", side.as_str())
            .with("type", order_type.as_str())
            .merge_options(options)?;

        let response: Value = self
            .dispatcher
            .signed(Method::POST, "/dapi/v1/order", params)
            .await?;
        debug!(order_id = ?response.get("orderId"), "Coin-m order accepted");
        Ok(response)
    }

    /// Amend the quantity or price of a LIMIT order
    #[instrument(skip(self, options))]
    pub async fn modify_order(
        &self,
        symbol: &str,
        side: OrderSide,
        options: &ModifyOrderOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        if options.order_id.is_none() && options.orig_client_order_id.is_none() {
            return Err(RestError::InvalidParameter(
                "orderId or origClientOrderId must be sent".to_string(),
            ));
        }
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("side", side.as_str())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::PUT, "/dapi/v1/order", params)
            .await
    }

    /// Place up to five orders at once
    #[instrument(skip(self, orders, options))]
    pub async fn batch_orders(
        &self,
        orders: &[BatchOrder],
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("batchOrders", batch_orders_value(orders)?)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/batchOrders", params)
            .await
    }

    /// Amend up to five orders at once
    #[instrument(skip(self, orders, options))]
    pub async fn modify_batch_orders(
        &self,
        orders: &[BatchModifyOrder],
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("batchOrders", batch_orders_value(orders)?)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::PUT, "/dapi/v1/batchOrders", params)
            .await
    }

    /// Amendment history of an order
    #[instrument(skip(self, options))]
    pub async fn order_modify_history(
        &self,
        symbol: &str,
        options: &OrderModifyHistoryOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/dapi/v1/orderAmendment", symbol, options)
            .await
    }

    /// Query an order
    #[instrument(skip(self, options))]
    pub async fn query_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/dapi/v1/order", symbol, options)
            .await
    }

    /// Cancel an order
    #[instrument(skip(self, options))]
    pub async fn cancel_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/dapi/v1/order", symbol, options)
            .await
    }

    /// Cancel every open order on a contract
    #[instrument(skip(self, options))]
    pub async fn cancel_all_open_orders(
        &self,
        symbol: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/dapi/v1/allOpenOrders", symbol, options)
            .await
    }

    /// Cancel several orders by id or client id
    #[instrument(skip(self, options))]
    pub async fn cancel_multiple_orders(
        &self,
        symbol: &str,
        options: &CancelMultipleOrdersOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/dapi/v1/batchOrders", symbol, options)
            .await
    }

    /// Cancel all open orders on a contract after a countdown in milliseconds
    #[instrument(skip(self, options))]
    pub async fn auto_cancel_all_open_orders(
        &self,
        symbol: &str,
        countdown_time: u64,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("countdownTime", countdown_time)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/countdownCancelAll", params)
            .await
    }

    /// Query one open order
    #[instrument(skip(self, options))]
    pub async fn open_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/dapi/v1/openOrder", symbol, options)
            .await
    }

    /// Open orders by contract, pair or all
    #[instrument(skip(self, options))]
    pub async fn open_orders(&self, options: &SignedSymbolPairOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/openOrders", options)
            .await
    }

    /// Every order on a contract or pair
    #[instrument(skip(self, options))]
    pub async fn all_orders(&self, options: &CoinMAllOrdersOptions) -> RestResult<Value> {
        let params = symbol_or_pair_params(&options.symbol, &options.pair)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/dapi/v1/allOrders", params)
            .await
    }

    // ========================================================================
    // Account and positions
    // ========================================================================

    /// Futures wallet balances
    #[instrument(skip(self, options))]
    pub async fn balance(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/balance", options)
            .await
    }

    /// Account information
    #[instrument(skip(self, options))]
    pub async fn account(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/account", options)
            .await
    }

    /// Change initial leverage (1 to 125)
    #[instrument(skip(self, options))]
    pub async fn change_leverage(
        &self,
        symbol: &str,
        leverage: u8,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        if leverage == 0 || leverage > 125 {
            return Err(RestError::InvalidParameter(format!(
                "leverage must be between 1 and 125, got {leverage}"
            )));
        }
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("leverage", leverage)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/leverage", params)
            .await
    }

    /// Switch a contract between isolated and crossed margin
    #[instrument(skip(self, options))]
    pub async fn change_margin_type(
        &self,
        symbol: &str,
        margin_type: MarginType,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("marginType", margin_type.as_str())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/marginType", params)
            .await
    }

    /// Add or reduce isolated position margin
    #[instrument(skip(self, options))]
    pub async fn modify_position_margin(
        &self,
        symbol: &str,
        amount: Decimal,
        change: PositionMarginType,
        options: &ModifyPositionMarginOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("amount", amount.to_string())
            .with("type", change.as_u8())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/dapi/v1/positionMargin", params)
            .await
    }

    /// Position margin change history
    #[instrument(skip(self, options))]
    pub async fn position_margin_history(
        &self,
        symbol: &str,
        options: &PositionMarginHistoryOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/dapi/v1/positionMargin/history", symbol, options)
            .await
    }

    /// Position information
    #[instrument(skip(self, options))]
    pub async fn position_risk(&self, options: &PositionRiskOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/positionRisk", options)
            .await
    }

    /// Trades of the account on a contract or pair
    #[instrument(skip(self, options))]
    pub async fn user_trades(&self, options: &CoinMTradeListOptions) -> RestResult<Value> {
        let params = symbol_or_pair_params(&options.symbol, &options.pair)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/dapi/v1/userTrades", params)
            .await
    }

    /// Income history
    #[instrument(skip(self, options))]
    pub async fn income_history(&self, options: &IncomeHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/income", options)
            .await
    }

    /// Notional brackets by pair
    #[instrument(skip(self, options))]
    pub async fn leverage_bracket(&self, options: &PairOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/leverageBracket", options)
            .await
    }

    /// Notional brackets by contract symbol
    #[instrument(skip(self, options))]
    pub async fn leverage_bracket_v2(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v2/leverageBracket", options)
            .await
    }

    /// Liquidation and ADL orders of the account
    #[instrument(skip(self, options))]
    pub async fn force_orders(&self, options: &ForceOrdersOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/forceOrders", options)
            .await
    }

    /// Position ADL quantile estimation
    #[instrument(skip(self, options))]
    pub async fn adl_quantile(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/adlQuantile", options)
            .await
    }

    /// Maker and taker commission rate of a contract
    #[instrument(skip(self, options))]
    pub async fn commission_rate(&self, symbol: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/dapi/v1/commissionRate", symbol, options)
            .await
    }

    async fn with_symbol<O: Serialize>(
        &self,
        method: Method,
        path: &str,
        symbol: &str,
        options: &O,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }
}

fn require_symbol_or_pair(symbol: &Option<String>, pair: &Option<String>) -> RestResult<()> {
    if require("symbol", symbol).is_err() && require("pair", pair).is_err() {
        return Err(RestError::InvalidParameter(
            "either symbol or pair must be sent".to_string(),
        ));
    }
    Ok(())
}

/// Uppercased `symbol` and/or `pair`, whichever are set
fn symbol_or_pair_params(symbol: &Option<String>, pair: &Option<String>) -> RestResult<Params> {
    require_symbol_or_pair(symbol, pair)?;
    let mut params = Params::new();
    for (key, value) in [("symbol", symbol), ("pair", pair)] {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            params.insert(key, value.to_uppercase());
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_or_pair() {
        assert!(require_symbol_or_pair(&Some("BTCUSD_PERP".into()), &None).is_ok());
        assert!(require_symbol_or_pair(&None, &Some("BTCUSD".into())).is_ok());
        assert!(matches!(
            require_symbol_or_pair(&None, &Some(" ".into())),
            Err(RestError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_symbol_and_pair_are_uppercased() {
        let options = CoinMAllOrdersOptions::builder()
            .pair("btcusd")
            .limit(10u32)
            .build();
        let params = symbol_or_pair_params(&options.symbol, &options.pair)
            .unwrap()
            .merge_options(&options)
            .unwrap();
        assert_eq!(
            crate::params::build_query_string(&crate::params::sanitize(&params)),
            "pair=BTCUSD&limit=10"
        );
    }

    #[test]
    fn test_batch_modify_entry_skips_unset_fields() {
        let order = BatchModifyOrder::builder()
            .symbol("btcusd_perp")
            .side(OrderSide::Buy)
            .order_id(42u64)
            .price(rust_decimal_macros::dec!(30000.5))
            .build();
        let value = batch_orders_value(&[order]).unwrap();
        assert_eq!(
            value.to_string(),
            r#"[{"symbol":"BTCUSD_PERP","side":"BUY","orderId":42,"price":"30000.5"}]"#
        );
    }
}
