//! Wallet endpoints: capital, deposits, withdrawals, dust and asset details
//!
//! Everything here is signed except [`WalletEndpoints::system_status`].

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::endpoints::{join_csv, RecvWindowOptions, SignedFilterOptions};
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    /// Optional fields for a withdrawal
    WithdrawOptions {
        withdraw_order_id: String,
        network: String,
        /// Secondary address identifier (memo/tag)
        address_tag: String,
        /// When true, the fee is deducted from the withdrawn amount
        transaction_fee_flag: bool,
        /// Address book label
        name: String,
        /// 0 spot wallet, 1 funding wallet
        wallet_type: u8,
        recv_window: u64,
    }
}

options! {
    /// Deposit history filter
    DepositHistoryOptions {
        coin: String,
        /// 0 pending, 6 credited but cannot withdraw, 1 success
        status: u8,
        start_time: u64,
        end_time: u64,
        offset: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    /// Withdrawal history filter
    WithdrawHistoryOptions {
        coin: String,
        withdraw_order_id: String,
        status: u8,
        offset: u32,
        limit: u32,
        start_time: u64,
        end_time: u64,
        recv_window: u64,
    }
}

options! {
    DepositAddressOptions {
        network: String,
        recv_window: u64,
    }
}

options! {
    DustLogOptions {
        start_time: u64,
        end_time: u64,
        recv_window: u64,
    }
}

options! {
    AssetDividendOptions {
        asset: String,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    AssetDetailOptions {
        asset: String,
        recv_window: u64,
    }
}

options! {
    TradeFeeOptions {
        symbol: String,
        recv_window: u64,
    }
}

options! {
    /// Isolated margin legs of a universal transfer
    UniversalTransferOptions {
        from_symbol: String,
        to_symbol: String,
        recv_window: u64,
    }
}

options! {
    UniversalTransferHistoryOptions {
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        from_symbol: String,
        to_symbol: String,
        recv_window: u64,
    }
}

options! {
    FundingWalletOptions {
        asset: String,
        /// `"true"` or `"false"`
        need_btc_valuation: String,
        recv_window: u64,
    }
}

/// Wallet endpoints
#[derive(Debug, Clone, Copy)]
pub struct WalletEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> WalletEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// System maintenance status
    #[instrument(skip(self))]
    pub async fn system_status(&self) -> RestResult<Value> {
        self.dispatcher
            .public(Method::GET, "/sapi/v1/system/status", Params::new())
            .await
    }

    /// Deposit and withdrawal details of every coin
    #[instrument(skip(self, options))]
    pub async fn coin_info(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/capital/config/getall", options)
            .await
    }

    /// Daily account snapshot
    ///
    /// # Arguments
    /// * `account_type` - "SPOT", "MARGIN" or "FUTURES"
    #[instrument(skip(self, options))]
    pub async fn account_snapshot(
        &self,
        account_type: &str,
        options: &SignedFilterOptions,
    ) -> RestResult<Value> {
        require("type", account_type)?;
        let params = Params::new()
            .with("type", account_type.to_uppercase())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/accountSnapshot", params)
            .await
    }

    /// Disable fast withdraw switch
    #[instrument(skip(self, options))]
    pub async fn disable_fast_withdraw(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::POST, "/sapi/v1/account/disableFastWithdrawSwitch", options)
            .await
    }

    /// Enable fast withdraw switch
    #[instrument(skip(self, options))]
    pub async fn enable_fast_withdraw(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::POST, "/sapi/v1/account/enableFastWithdrawSwitch", options)
            .await
    }

    /// Submit a withdrawal
    #[instrument(skip(self, options))]
    pub async fn withdraw(
        &self,
        coin: &str,
        address: &str,
        amount: Decimal,
        options: &WithdrawOptions,
    ) -> RestResult<Value> {
        require("coin", coin)?;
        require("address", address)?;
        let params = Params::new()
            .with("coin", coin.to_uppercase())
            .with("address", address)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/capital/withdraw/apply", params)
            .await
    }

    /// Deposit history
    #[instrument(skip(self, options))]
    pub async fn deposit_history(&self, options: &DepositHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/capital/deposit/hisrec", options)
            .await
    }

    /// Withdrawal history
    #[instrument(skip(self, options))]
    pub async fn withdraw_history(&self, options: &WithdrawHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/capital/withdraw/history", options)
            .await
    }

    /// Deposit address for a coin
    #[instrument(skip(self, options))]
    pub async fn deposit_address(
        &self,
        coin: &str,
        options: &DepositAddressOptions,
    ) -> RestResult<Value> {
        require("coin", coin)?;
        let params = Params::new()
            .with("coin", coin.to_uppercase())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/capital/deposit/address", params)
            .await
    }

    /// Account status
    #[instrument(skip(self, options))]
    pub async fn account_status(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/account/status", options)
            .await
    }

    /// API trading status
    #[instrument(skip(self, options))]
    pub async fn trading_status(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/account/apiTradingStatus", options)
            .await
    }

    /// Dust conversion log
    #[instrument(skip(self, options))]
    pub async fn dust_log(&self, options: &DustLogOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/asset/dribblet", options)
            .await
    }

    /// Convert small balances to BNB
    ///
    /// Assets are sent comma-separated.
    #[instrument(skip(self, options))]
    pub async fn dust_transfer(
        &self,
        assets: &[&str],
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", assets)?;
        let params = Params::new()
            .with("asset", join_csv(assets))
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/asset/dust", params)
            .await
    }

    /// Asset dividend records
    #[instrument(skip(self, options))]
    pub async fn asset_dividend_record(&self, options: &AssetDividendOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/asset/assetDividend", options)
            .await
    }

    /// Deposit and withdrawal limits and fees per asset
    #[instrument(skip(self, options))]
    pub async fn asset_detail(&self, options: &AssetDetailOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/asset/assetDetail", options)
            .await
    }

    /// Maker/taker fees per symbol
    #[instrument(skip(self, options))]
    pub async fn trade_fee(&self, options: &TradeFeeOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/asset/tradeFee", options)
            .await
    }

    /// Transfer between the user's own wallets
    ///
    /// # Arguments
    /// * `transfer_type` - e.g. "MAIN_UMFUTURE", "MAIN_MARGIN"
    #[instrument(skip(self, options))]
    pub async fn user_universal_transfer(
        &self,
        transfer_type: &str,
        asset: &str,
        amount: Decimal,
        options: &UniversalTransferOptions,
    ) -> RestResult<Value> {
        require("type", transfer_type)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("type", transfer_type)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/asset/transfer", params)
            .await
    }

    /// Universal transfer history for one transfer type
    #[instrument(skip(self, options))]
    pub async fn user_universal_transfer_history(
        &self,
        transfer_type: &str,
        options: &UniversalTransferHistoryOptions,
    ) -> RestResult<Value> {
        require("type", transfer_type)?;
        let params = Params::new()
            .with("type", transfer_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/asset/transfer", params)
            .await
    }

    /// Funding wallet balances
    #[instrument(skip(self, options))]
    pub async fn funding_wallet(&self, options: &FundingWalletOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::POST, "/sapi/v1/asset/get-funding-asset", options)
            .await
    }

    /// Permissions of the API key
    #[instrument(skip(self, options))]
    pub async fn api_permissions(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/account/apiRestrictions", options)
            .await
    }

    /// Assets that can be converted into BNB
    #[instrument(skip(self, options))]
    pub async fn bnb_convertible_assets(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::POST, "/sapi/v1/asset/dust-btc", options)
            .await
    }
}
