//! Read-only history: C2C, fiat, crypto loans, NFT, Pay and spot rebates

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    C2cHistoryOptions {
        start_timestamp: u64,
        end_timestamp: u64,
        page: u32,
        rows: u32,
        recv_window: u64,
    }
}

options! {
    FiatHistoryOptions {
        begin_time: u64,
        end_time: u64,
        page: u32,
        rows: u32,
        recv_window: u64,
    }
}

options! {
    LoanHistoryOptions {
        /// "borrowIn", "collateralSpent", "repayAmount", ...
        #[serde(rename = "type")]
        income_type: String,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    NftHistoryOptions {
        start_time: u64,
        end_time: u64,
        limit: u32,
        page: u32,
        recv_window: u64,
    }
}

options! {
    NftAssetOptions {
        limit: u32,
        page: u32,
        recv_window: u64,
    }
}

options! {
    PayHistoryOptions {
        start_timestamp: u64,
        end_timestamp: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    RebateHistoryOptions {
        start_time: u64,
        end_time: u64,
        page: u32,
        recv_window: u64,
    }
}

/// Fiat transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiatTransactionType {
    /// Deposit or buy
    Deposit = 0,
    /// Withdraw or sell
    Withdraw = 1,
}

/// History endpoints
#[derive(Debug, Clone, Copy)]
pub struct HistoryEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> HistoryEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// C2C trade history
    ///
    /// # Arguments
    /// * `trade_type` - "BUY" or "SELL"
    #[instrument(skip(self, options))]
    pub async fn c2c_trade_history(
        &self,
        trade_type: &str,
        options: &C2cHistoryOptions,
    ) -> RestResult<Value> {
        require("tradeType", trade_type)?;
        let params = Params::new()
            .with("tradeType", trade_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/c2c/orderMatch/listUserOrderHistory", params)
            .await
    }

    /// Fiat deposit and withdrawal history
    #[instrument(skip(self, options))]
    pub async fn fiat_deposit_withdrawal_history(
        &self,
        transaction_type: FiatTransactionType,
        options: &FiatHistoryOptions,
    ) -> RestResult<Value> {
        self.fiat("/sapi/v1/fiat/orders", transaction_type, options)
            .await
    }

    /// Fiat payment history
    #[instrument(skip(self, options))]
    pub async fn fiat_payment_history(
        &self,
        transaction_type: FiatTransactionType,
        options: &FiatHistoryOptions,
    ) -> RestResult<Value> {
        self.fiat("/sapi/v1/fiat/payments", transaction_type, options)
            .await
    }

    async fn fiat(
        &self,
        path: &str,
        transaction_type: FiatTransactionType,
        options: &FiatHistoryOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("transactionType", transaction_type as u8)
            .merge_options(options)?;
        self.dispatcher.signed(Method::GET, path, params).await
    }

    /// Crypto loan income history
    #[instrument(skip(self, options))]
    pub async fn loan_history(&self, asset: &str, options: &LoanHistoryOptions) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new().with("asset", asset).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/loan/income", params)
            .await
    }

    /// NFT transaction history
    ///
    /// # Arguments
    /// * `order_type` - 0 purchase, 1 sell, 2 royalty income, 3 primary market, 4 mint fee
    #[instrument(skip(self, options))]
    pub async fn nft_transaction_history(
        &self,
        order_type: u8,
        options: &NftHistoryOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("orderType", order_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/nft/history/transactions", params)
            .await
    }

    /// NFT deposit history
    #[instrument(skip(self, options))]
    pub async fn nft_deposit_history(&self, options: &NftHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/nft/history/deposit", options)
            .await
    }

    /// NFT withdrawal history
    #[instrument(skip(self, options))]
    pub async fn nft_withdraw_history(&self, options: &NftHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/nft/history/withdraw", options)
            .await
    }

    /// NFT assets held
    #[instrument(skip(self, options))]
    pub async fn nft_asset(&self, options: &NftAssetOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/nft/user/getAsset", options)
            .await
    }

    /// Binance Pay transactions
    #[instrument(skip(self, options))]
    pub async fn pay_history(&self, options: &PayHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/pay/transactions", options)
            .await
    }

    /// Spot rebate history
    #[instrument(skip(self, options))]
    pub async fn rebate_spot_history(&self, options: &RebateHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/rebate/taxQuery", options)
            .await
    }
}
