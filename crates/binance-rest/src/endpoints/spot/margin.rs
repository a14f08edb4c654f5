//! Cross and isolated margin endpoints
//!
//! `isIsolated` is the string `"TRUE"` or `"FALSE"` on the wire.

use binance_types::{MarginTransferType, NewOrderRespType, OrderSide, OrderType, SideEffectType, TimeInForce};
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::RecvWindowOptions;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    /// Borrow/repay target
    MarginLoanOptions {
        is_isolated: String,
        /// Isolated symbol, required when `is_isolated` is `"TRUE"`
        symbol: String,
        recv_window: u64,
    }
}

options! {
    /// Optional fields of a margin order
    NewMarginOrderOptions {
        is_isolated: String,
        quantity: Decimal,
        quote_order_qty: Decimal,
        price: Decimal,
        stop_price: Decimal,
        new_client_order_id: String,
        iceberg_qty: Decimal,
        new_order_resp_type: NewOrderRespType,
        side_effect_type: SideEffectType,
        time_in_force: TimeInForce,
        recv_window: u64,
    }
}

options! {
    /// Identify a margin order to cancel
    CancelMarginOrderOptions {
        is_isolated: String,
        order_id: u64,
        orig_client_order_id: String,
        new_client_order_id: String,
        recv_window: u64,
    }
}

options! {
    IsolatedFlagOptions {
        is_isolated: String,
        recv_window: u64,
    }
}

options! {
    MarginTransferHistoryOptions {
        asset: String,
        /// "ROLL_IN" or "ROLL_OUT"
        #[serde(rename = "type")]
        transfer_type: String,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        archived: bool,
        recv_window: u64,
    }
}

options! {
    MarginLoanRecordOptions {
        isolated_symbol: String,
        tx_id: u64,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        archived: bool,
        recv_window: u64,
    }
}

options! {
    MarginInterestHistoryOptions {
        asset: String,
        isolated_symbol: String,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        archived: bool,
        recv_window: u64,
    }
}

options! {
    ForceLiquidationOptions {
        start_time: u64,
        end_time: u64,
        isolated_symbol: String,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    /// Identify a margin order
    MarginOrderQueryOptions {
        is_isolated: String,
        order_id: u64,
        orig_client_order_id: String,
        recv_window: u64,
    }
}

options! {
    MarginOpenOrdersOptions {
        symbol: String,
        is_isolated: String,
        recv_window: u64,
    }
}

options! {
    MarginAllOrdersOptions {
        is_isolated: String,
        order_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    /// Optional fields of a margin OCO order
    MarginOcoOrderOptions {
        is_isolated: String,
        list_client_order_id: String,
        limit_client_order_id: String,
        limit_iceberg_qty: Decimal,
        stop_client_order_id: String,
        stop_limit_price: Decimal,
        stop_iceberg_qty: Decimal,
        stop_limit_time_in_force: TimeInForce,
        new_order_resp_type: NewOrderRespType,
        side_effect_type: SideEffectType,
        recv_window: u64,
    }
}

options! {
    CancelMarginOcoOptions {
        is_isolated: String,
        order_list_id: u64,
        list_client_order_id: String,
        new_client_order_id: String,
        recv_window: u64,
    }
}

options! {
    GetMarginOcoOptions {
        is_isolated: String,
        symbol: String,
        order_list_id: u64,
        orig_client_order_id: String,
        recv_window: u64,
    }
}

options! {
    GetMarginOcoListOptions {
        is_isolated: String,
        symbol: String,
        from_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    MarginMyTradesOptions {
        is_isolated: String,
        start_time: u64,
        end_time: u64,
        from_id: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    IsolatedSymbolOptions {
        isolated_symbol: String,
        recv_window: u64,
    }
}

options! {
    InterestRateHistoryOptions {
        vip_level: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    IsolatedTransferHistoryOptions {
        asset: String,
        trans_from: String,
        trans_to: String,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    IsolatedAccountInfoOptions {
        /// Up to 5 symbols, comma-separated
        symbols: String,
        recv_window: u64,
    }
}

options! {
    MarginFeeOptions {
        vip_level: u8,
        coin: String,
        recv_window: u64,
    }
}

options! {
    IsolatedTierOptions {
        tier: String,
        recv_window: u64,
    }
}

options! {
    MarginOrderCountOptions {
        is_isolated: String,
        symbol: String,
        recv_window: u64,
    }
}

/// Margin account endpoints
#[derive(Debug, Clone, Copy)]
pub struct MarginEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> MarginEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    // ========================================================================
    // Transfers and loans
    // ========================================================================

    /// Transfer between spot and cross margin
    #[instrument(skip(self, options))]
    pub async fn transfer(
        &self,
        asset: &str,
        amount: Decimal,
        direction: MarginTransferType,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("asset", asset.to_uppercase())
            .with("amount", amount.to_string())
            .with("type", direction.as_u8())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/margin/transfer", params)
            .await
    }

    /// Borrow an asset
    #[instrument(skip(self, options))]
    pub async fn borrow(
        &self,
        asset: &str,
        amount: Decimal,
        options: &MarginLoanOptions,
    ) -> RestResult<Value> {
        self.loan(Method::POST, "/sapi/v1/margin/loan", asset, amount, options)
            .await
    }

    /// Repay a loan
    #[instrument(skip(self, options))]
    pub async fn repay(
        &self,
        asset: &str,
        amount: Decimal,
        options: &MarginLoanOptions,
    ) -> RestResult<Value> {
        self.loan(Method::POST, "/sapi/v1/margin/repay", asset, amount, options)
            .await
    }

    async fn loan(
        &self,
        method: Method,
        path: &str,
        asset: &str,
        amount: Decimal,
        options: &MarginLoanOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("asset", asset.to_uppercase())
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }

    // ========================================================================
    // Market data (API key only)
    // ========================================================================

    /// Margin asset details
    #[instrument(skip(self))]
    pub async fn asset(&self, asset: &str) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new().with("asset", asset.to_uppercase());
        self.dispatcher
            .public(Method::GET, "/sapi/v1/margin/asset", params)
            .await
    }

    /// Cross margin pair details
    #[instrument(skip(self))]
    pub async fn pair(&self, symbol: &str) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new().with("symbol", symbol.to_uppercase());
        self.dispatcher
            .public(Method::GET, "/sapi/v1/margin/pair", params)
            .await
    }

    /// Every margin asset
    #[instrument(skip(self))]
    pub async fn all_assets(&self) -> RestResult<Value> {
        self.dispatcher
            .public(Method::GET, "/sapi/v1/margin/allAssets", Params::new())
            .await
    }

    /// Every cross margin pair
    #[instrument(skip(self))]
    pub async fn all_pairs(&self) -> RestResult<Value> {
        self.dispatcher
            .public(Method::GET, "/sapi/v1/margin/allPairs", Params::new())
            .await
    }

    /// Margin price index for a symbol
    #[instrument(skip(self))]
    pub async fn price_index(&self, symbol: &str) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new().with("symbol", symbol.to_uppercase());
        self.dispatcher
            .public(Method::GET, "/sapi/v1/margin/priceIndex", params)
            .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Place a margin order
    #[instrument(skip(self, options))]
    pub async fn new_order(
        &self,
        symbol: &str,
        side: OrderSide,
        order_type: OrderType,
        options: &NewMarginOrderOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("side", side.as_str())
            .with("type", order_type.as_str())
            .merge_options(options)?;

        let response: Value = self
            .dispatcher
            .signed(Method::POST, "/sapi/v1/margin/order", params)
            .await?;
        debug!(order_id = ?response.get("orderId"), "Margin order accepted");
        Ok(response)
    }

    /// Cancel a margin order
    #[instrument(skip(self, options))]
    pub async fn cancel_order(
        &self,
        symbol: &str,
        options: &CancelMarginOrderOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/sapi/v1/margin/order", symbol, options)
            .await
    }

    /// Cancel every open order on a symbol
    #[instrument(skip(self, options))]
    pub async fn cancel_all_open_orders(
        &self,
        symbol: &str,
        options: &IsolatedFlagOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/sapi/v1/margin/openOrders", symbol, options)
            .await
    }

    /// Query a margin order
    #[instrument(skip(self, options))]
    pub async fn order(&self, symbol: &str, options: &MarginOrderQueryOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/sapi/v1/margin/order", symbol, options)
            .await
    }

    /// Open margin orders
    #[instrument(skip(self, options))]
    pub async fn open_orders(&self, options: &MarginOpenOrdersOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/openOrders", options)
            .await
    }

    /// All margin orders on a symbol
    #[instrument(skip(self, options))]
    pub async fn all_orders(&self, symbol: &str, options: &MarginAllOrdersOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/sapi/v1/margin/allOrders", symbol, options)
            .await
    }

    /// Place a margin OCO order
    #[instrument(skip(self, options))]
    pub async fn new_oco_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        options: &MarginOcoOrderOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("side", side.as_str())
            .with("quantity", quantity.to_string())
            .with("price", price.to_string())
            .with("stopPrice", stop_price.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/margin/order/oco", params)
            .await
    }

    /// Cancel a margin OCO order
    #[instrument(skip(self, options))]
    pub async fn cancel_oco_order(
        &self,
        symbol: &str,
        options: &CancelMarginOcoOptions,
    ) -> RestResult<Value> {
        self.with_symbol(Method::DELETE, "/sapi/v1/margin/orderList", symbol, options)
            .await
    }

    /// Query a margin OCO order
    #[instrument(skip(self, options))]
    pub async fn get_oco_order(&self, options: &GetMarginOcoOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/orderList", options)
            .await
    }

    /// All margin OCO orders
    #[instrument(skip(self, options))]
    pub async fn get_oco_orders(&self, options: &GetMarginOcoListOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/allOrderList", options)
            .await
    }

    /// Open margin OCO orders
    #[instrument(skip(self, options))]
    pub async fn get_open_oco_orders(&self, options: &MarginOpenOrdersOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/openOrderList", options)
            .await
    }

    /// Margin account trade list
    #[instrument(skip(self, options))]
    pub async fn my_trades(&self, symbol: &str, options: &MarginMyTradesOptions) -> RestResult<Value> {
        self.with_symbol(Method::GET, "/sapi/v1/margin/myTrades", symbol, options)
            .await
    }

    /// Order rate limit usage
    #[instrument(skip(self, options))]
    pub async fn order_count(&self, options: &MarginOrderCountOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/rateLimit/order", options)
            .await
    }

    // ========================================================================
    // Account and history
    // ========================================================================

    /// Cross margin account details
    #[instrument(skip(self, options))]
    pub async fn account(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/account", options)
            .await
    }

    /// Transfer history between spot and margin
    #[instrument(skip(self, options))]
    pub async fn transfer_history(&self, options: &MarginTransferHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/transfer", options)
            .await
    }

    /// Loan records for an asset
    #[instrument(skip(self, options))]
    pub async fn loan_record(&self, asset: &str, options: &MarginLoanRecordOptions) -> RestResult<Value> {
        self.with_asset(Method::GET, "/sapi/v1/margin/loan", asset, options)
            .await
    }

    /// Repay records for an asset
    #[instrument(skip(self, options))]
    pub async fn repay_record(&self, asset: &str, options: &MarginLoanRecordOptions) -> RestResult<Value> {
        self.with_asset(Method::GET, "/sapi/v1/margin/repay", asset, options)
            .await
    }

    /// Interest history
    #[instrument(skip(self, options))]
    pub async fn interest_history(&self, options: &MarginInterestHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/interestHistory", options)
            .await
    }

    /// Forced liquidation records
    #[instrument(skip(self, options))]
    pub async fn force_liquidation_record(&self, options: &ForceLiquidationOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/forceLiquidationRec", options)
            .await
    }

    /// Maximum borrowable amount of an asset
    #[instrument(skip(self, options))]
    pub async fn max_borrowable(&self, asset: &str, options: &IsolatedSymbolOptions) -> RestResult<Value> {
        self.with_asset(Method::GET, "/sapi/v1/margin/maxBorrowable", asset, options)
            .await
    }

    /// Maximum transferable amount of an asset
    #[instrument(skip(self, options))]
    pub async fn max_transferable(&self, asset: &str, options: &IsolatedSymbolOptions) -> RestResult<Value> {
        self.with_asset(Method::GET, "/sapi/v1/margin/maxTransferable", asset, options)
            .await
    }

    /// Interest rate history of an asset
    ///
    /// The asset is sent as given.
    #[instrument(skip(self, options))]
    pub async fn interest_rate_history(
        &self,
        asset: &str,
        options: &InterestRateHistoryOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new().with("asset", asset).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/margin/interestRateHistory", params)
            .await
    }

    /// Cross margin fee data
    #[instrument(skip(self, options))]
    pub async fn fee(&self, options: &MarginFeeOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/crossMarginData", options)
            .await
    }

    // ========================================================================
    // Isolated margin
    // ========================================================================

    /// Transfer between spot and an isolated margin account
    ///
    /// # Arguments
    /// * `trans_from`, `trans_to` - "SPOT" or "ISOLATED_MARGIN"
    #[instrument(skip(self, options))]
    pub async fn isolated_transfer(
        &self,
        asset: &str,
        symbol: &str,
        trans_from: &str,
        trans_to: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        require("symbol", symbol)?;
        require("transFrom", trans_from)?;
        require("transTo", trans_to)?;
        let params = Params::new()
            .with("asset", asset)
            .with("symbol", symbol)
            .with("transFrom", trans_from)
            .with("transTo", trans_to)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/margin/isolated/transfer", params)
            .await
    }

    /// Isolated margin transfer history
    #[instrument(skip(self, options))]
    pub async fn isolated_transfer_history(
        &self,
        symbol: &str,
        options: &IsolatedTransferHistoryOptions,
    ) -> RestResult<Value> {
        self.with_raw_symbol(Method::GET, "/sapi/v1/margin/isolated/transfer", symbol, options)
            .await
    }

    /// Isolated margin account info
    #[instrument(skip(self, options))]
    pub async fn isolated_account_info(&self, options: &IsolatedAccountInfoOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/isolated/account", options)
            .await
    }

    /// Disable an isolated margin account
    #[instrument(skip(self, options))]
    pub async fn disable_isolated_account(
        &self,
        symbol: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_raw_symbol(Method::DELETE, "/sapi/v1/margin/isolated/account", symbol, options)
            .await
    }

    /// Enable an isolated margin account
    #[instrument(skip(self, options))]
    pub async fn enable_isolated_account(
        &self,
        symbol: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_raw_symbol(Method::POST, "/sapi/v1/margin/isolated/account", symbol, options)
            .await
    }

    /// Number of isolated accounts enabled and allowed
    #[instrument(skip(self, options))]
    pub async fn isolated_account_limit(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/isolated/accountLimit", options)
            .await
    }

    /// Isolated margin symbol details
    #[instrument(skip(self, options))]
    pub async fn isolated_symbol(&self, symbol: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_raw_symbol(Method::GET, "/sapi/v1/margin/isolated/pair", symbol, options)
            .await
    }

    /// Every isolated margin symbol
    #[instrument(skip(self, options))]
    pub async fn isolated_all_symbols(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/isolated/allPairs", options)
            .await
    }

    /// Isolated margin fee data
    #[instrument(skip(self, options))]
    pub async fn isolated_fee(&self, options: &MarginFeeOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/margin/isolatedMarginData", options)
            .await
    }

    /// Isolated margin tier data
    #[instrument(skip(self, options))]
    pub async fn isolated_tier(&self, symbol: &str, options: &IsolatedTierOptions) -> RestResult<Value> {
        self.with_raw_symbol(Method::GET, "/sapi/v1/margin/isolatedMarginTier", symbol, options)
            .await
    }

    /// Portfolio margin account
    #[instrument(skip(self, options))]
    pub async fn portfolio_margin_account(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/portfolio/account", options)
            .await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn with_symbol<O: serde::Serialize>(
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

    /// Isolated margin endpoints take the symbol as given
    async fn with_raw_symbol<O: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        symbol: &str,
        options: &O,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new().with("symbol", symbol).merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }

    async fn with_asset<O: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        asset: &str,
        options: &O,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("asset", asset.to_uppercase())
            .merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }
}
