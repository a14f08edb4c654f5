//! USD-M futures account and trading (`fapi` host, signed)

use binance_types::{MarginType, OrderSide, OrderType, PositionMarginType};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::futures::{
    batch_orders_value, BatchOrder, CancelMultipleOrdersOptions, ForceOrdersOptions,
    FuturesOrderIdOptions, IncomeHistoryOptions, ModifyPositionMarginOptions,
    NewFuturesOrderOptions, PositionMarginHistoryOptions, SignedSymbolOptions,
};
use crate::endpoints::RecvWindowOptions;
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::validation::require;

options! {
    UsdMAllOrdersOptions {
        order_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    UsdMTradeListOptions {
        from_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

/// USD-M trading endpoints
#[derive(Debug, Clone, Copy)]
pub struct UsdMTradeEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> UsdMTradeEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    // ========================================================================
    // Account modes
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
            .signed(Method::POST, "/fapi/v1/positionSide/dual", params)
            .await
    }

    /// Current position mode
    #[instrument(skip(self, options))]
    pub async fn position_mode(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/positionSide/dual", options)
            .await
    }

    /// Turn multi-assets mode on or off
    #[instrument(skip(self, options))]
    pub async fn change_multi_assets_mode(
        &self,
        multi_assets_margin: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("multiAssetsMargin", multi_assets_margin.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/fapi/v1/multiAssetsMargin", params)
            .await
    }

    /// Current multi-assets mode
    #[instrument(skip(self, options))]
    pub async fn multi_assets_mode(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/multiAssetsMargin", options)
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
            .signed(Method::POST, "/fapi/v1/order", params)
            .await?;
        debug!(order_id = ?response.get("orderId"), "Futures order accepted");
        Ok(response)
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
            .signed(Method::POST, "/fapi/v1/batchOrders", params)
            .await
    }

    /// Query an order
    #[instrument(skip(self, options))]
    pub async fn query_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/order", symbol, options)
            .await
    }

    /// Cancel an order
    #[instrument(skip(self, options))]
    pub async fn cancel_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/fapi/v1/order", symbol, options)
            .await
    }

    /// Cancel every open order on a symbol
    #[instrument(skip(self, options))]
    pub async fn cancel_all_open_orders(
        &self,
        symbol: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/fapi/v1/allOpenOrders", symbol, options)
            .await
    }

    /// Cancel several orders by id or client id
    #[instrument(skip(self, options))]
    pub async fn cancel_multiple_orders(
        &self,
        symbol: &str,
        options: &CancelMultipleOrdersOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/fapi/v1/batchOrders", symbol, options)
            .await
    }

    /// Cancel all open orders on a symbol after a countdown
    ///
    /// # Arguments
    /// * `countdown_time` - Milliseconds; 0 stops the timer
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
            .signed(Method::POST, "/fapi/v1/countdownCancelAll", params)
            .await
    }

    /// Query one open order
    #[instrument(skip(self, options))]
    pub async fn open_order(&self, symbol: &str, options: &FuturesOrderIdOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/openOrder", symbol, options)
            .await
    }

    /// All open orders, optionally for one symbol
    #[instrument(skip(self, options))]
    pub async fn open_orders(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/openOrders", options)
            .await
    }

    /// Every order on a symbol (active, canceled or filled)
    #[instrument(skip(self, options))]
    pub async fn all_orders(&self, symbol: &str, options: &UsdMAllOrdersOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/allOrders", symbol, options)
            .await
    }

    // ========================================================================
    // Account and positions
    // ========================================================================

    /// Futures wallet balances
    #[instrument(skip(self, options))]
    pub async fn balance(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v2/balance", options)
            .await
    }

    /// Account information
    #[instrument(skip(self, options))]
    pub async fn account(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v2/account", options)
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
            .signed(Method::POST, "/fapi/v1/leverage", params)
            .await
    }

    /// Switch a symbol between isolated and crossed margin
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
            .signed(Method::POST, "/fapi/v1/marginType", params)
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
            .signed(Method::POST, "/fapi/v1/positionMargin", params)
            .await
    }

    /// Position margin change history
    #[instrument(skip(self, options))]
    pub async fn position_margin_history(
        &self,
        symbol: &str,
        options: &PositionMarginHistoryOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/positionMargin/history", symbol, options)
            .await
    }

    /// Position information
    #[instrument(skip(self, options))]
    pub async fn position_risk(&self, symbol: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v2/positionRisk", symbol, options)
            .await
    }

    /// Trades of the account on a symbol
    #[instrument(skip(self, options))]
    pub async fn user_trades(&self, symbol: &str, options: &UsdMTradeListOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/userTrades", symbol, options)
            .await
    }

    /// Income history
    #[instrument(skip(self, options))]
    pub async fn income_history(&self, options: &IncomeHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/income", options)
            .await
    }

    /// Notional and leverage brackets
    #[instrument(skip(self, options))]
    pub async fn leverage_bracket(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/leverageBracket", options)
            .await
    }

    /// Position ADL quantile estimation
    #[instrument(skip(self, options))]
    pub async fn adl_quantile(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/adlQuantile", options)
            .await
    }

    /// Liquidation and ADL orders of the account
    #[instrument(skip(self, options))]
    pub async fn force_orders(&self, options: &ForceOrdersOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/forceOrders", options)
            .await
    }

    /// Trading quantitative rules indicators
    #[instrument(skip(self, options))]
    pub async fn api_trading_status(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/apiTradingStatus", options)
            .await
    }

    /// Maker and taker commission rate of a symbol
    #[instrument(skip(self, options))]
    pub async fn commission_rate(&self, symbol: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/fapi/v1/commissionRate", symbol, options)
            .await
    }

    /// Request a download id for transaction history (range at most one year)
    #[instrument(skip(self, options))]
    pub async fn income_download_id(
        &self,
        start_time: u64,
        end_time: u64,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        if end_time < start_time {
            return Err(RestError::InvalidParameter(format!(
                "endTime {end_time} is before startTime {start_time}"
            )));
        }
        let params = Params::new()
            .with("startTime", start_time)
            .with("endTime", end_time)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/fapi/v1/income/asyn", params)
            .await
    }

    /// Download link for a transaction history download id
    #[instrument(skip(self, options))]
    pub async fn income_download_link(
        &self,
        download_id: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("downloadId", download_id)?;
        let params = Params::new()
            .with("downloadId", download_id)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/fapi/v1/income/asyn/id", params)
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
