//! Broker transfers, sub-account asset summaries and deposit history

use binance_types::FuturesType;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::BrokerEndpoints;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    /// Source and target sub-accounts; the master account when unset
    BrokerTransferOptions {
        from_id: String,
        to_id: String,
        client_tran_id: String,
        recv_window: u64,
    }
}

options! {
    BrokerTransferHistoryOptions {
        from_id: String,
        to_id: String,
        client_tran_id: String,
        /// `"true"` includes failed transfers
        show_all_status: String,
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    BrokerFuturesTransferHistoryOptions {
        client_tran_id: String,
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    BrokerUniversalTransferOptions {
        client_tran_id: String,
        from_id: String,
        to_id: String,
        recv_window: u64,
    }
}

options! {
    BrokerUniversalTransferHistoryOptions {
        from_id: String,
        to_id: String,
        client_tran_id: String,
        show_all_status: bool,
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    SubAssetOptions {
        sub_account_id: String,
        page: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    SubDepositHistoryOptions {
        sub_account_id: String,
        coin: String,
        /// 0 pending, 6 credited but cannot withdraw, 1 success
        status: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        offset: u32,
        recv_window: u64,
    }
}

impl<'a> BrokerEndpoints<'a> {
    // ========================================================================
    // Transfers
    // ========================================================================

    /// Spot transfer between the broker and its sub-accounts
    #[instrument(skip(self, options))]
    pub async fn spot_transfer(
        &self,
        asset: &str,
        amount: Decimal,
        options: &BrokerTransferOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("asset", asset.to_uppercase())
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/transfer", params)
            .await
    }

    /// Spot transfer history
    #[instrument(skip(self, options))]
    pub async fn spot_transfer_history(&self, options: &BrokerTransferHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/transfer", options)
            .await
    }

    /// Futures transfer between the broker and its sub-accounts
    #[instrument(skip(self, options))]
    pub async fn futures_transfer(
        &self,
        futures_type: FuturesType,
        asset: &str,
        amount: Decimal,
        options: &BrokerTransferOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("futuresType", futures_type.as_u8())
            .with("asset", asset.to_uppercase())
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/transfer/futures", params)
            .await
    }

    /// Futures transfer history of a sub-account
    #[instrument(skip(self, options))]
    pub async fn futures_transfer_history(
        &self,
        sub_account_id: &str,
        futures_type: FuturesType,
        options: &BrokerFuturesTransferHistoryOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with("futuresType", futures_type.as_u8())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/broker/transfer/futures", params)
            .await
    }

    /// Universal transfer across spot and futures wallets
    ///
    /// # Arguments
    /// * `from_account_type`, `to_account_type` - "SPOT", "USDT_FUTURE" or "COIN_FUTURE"
    #[instrument(skip(self, options))]
    pub async fn universal_transfer(
        &self,
        from_account_type: &str,
        to_account_type: &str,
        asset: &str,
        amount: Decimal,
        options: &BrokerUniversalTransferOptions,
    ) -> RestResult<Value> {
        require("fromAccountType", from_account_type)?;
        require("toAccountType", to_account_type)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("fromAccountType", from_account_type)
            .with("toAccountType", to_account_type)
            .with("asset", asset.to_uppercase())
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/universalTransfer", params)
            .await
    }

    /// Universal transfer history
    #[instrument(skip(self, options))]
    pub async fn universal_transfer_history(
        &self,
        options: &BrokerUniversalTransferHistoryOptions,
    ) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/universalTransfer", options)
            .await
    }

    // ========================================================================
    // Assets and deposits
    // ========================================================================

    /// Spot asset summary of sub-accounts
    #[instrument(skip(self, options))]
    pub async fn sub_spot_summary(&self, options: &SubAssetOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/subAccount/spotSummary", options)
            .await
    }

    /// Margin asset summary of sub-accounts
    #[instrument(skip(self, options))]
    pub async fn sub_margin_summary(&self, options: &SubAssetOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/subAccount/marginSummary", options)
            .await
    }

    /// USD-M futures asset summary of sub-accounts
    #[instrument(skip(self, options))]
    pub async fn sub_futures_summary(&self, options: &SubAssetOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/subAccount/futuresSummary", options)
            .await
    }

    /// Futures asset summary of sub-accounts, USD-M or COIN-M
    #[instrument(skip(self, options))]
    pub async fn sub_futures_summary_v2(
        &self,
        futures_type: FuturesType,
        options: &SubAssetOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("futuresType", futures_type.as_u8())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v2/broker/subAccount/futuresSummary", params)
            .await
    }

    /// Deposit history of sub-accounts
    #[instrument(skip(self, options))]
    pub async fn sub_deposit_history(&self, options: &SubDepositHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/subAccount/depositHist", options)
            .await
    }
}
