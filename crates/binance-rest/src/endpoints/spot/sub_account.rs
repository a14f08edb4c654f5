//! Sub-account management for master accounts
//!
//! Includes managed sub-accounts and sub-account API key IP restrictions.
//! Emails are sent as given.

use binance_types::FuturesType;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::endpoints::{RecvWindowOptions, SignedFilterOptions};
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    SubAccountListOptions {
        email: String,
        /// `"true"` or `"false"`
        is_freeze: String,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    SubTransferHistoryOptions {
        from_email: String,
        to_email: String,
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    SubDepositAddressOptions {
        network: String,
        recv_window: u64,
    }
}

options! {
    SubDepositHistoryOptions {
        coin: String,
        status: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        offset: u32,
        recv_window: u64,
    }
}

options! {
    EmailFilterOptions {
        email: String,
        recv_window: u64,
    }
}

options! {
    SubUserHistoryOptions {
        asset: String,
        /// 1 transfer in, 2 transfer out
        #[serde(rename = "type")]
        transfer_type: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    FuturesInternalTransferHistoryOptions {
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    SpotSummaryOptions {
        email: String,
        page: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    ManagedWithdrawOptions {
        /// Scheduled withdrawal time in milliseconds
        transfer_date: u64,
        recv_window: u64,
    }
}

options! {
    SubUniversalTransferOptions {
        from_email: String,
        to_email: String,
        client_tran_id: String,
        /// Isolated margin symbol
        symbol: String,
        recv_window: u64,
    }
}

options! {
    SubUniversalTransferHistoryOptions {
        from_email: String,
        to_email: String,
        client_tran_id: String,
        start_time: u64,
        end_time: u64,
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    FuturesSummaryOptions {
        page: u32,
        limit: u32,
        recv_window: u64,
    }
}

/// Sub-account endpoints
#[derive(Debug, Clone, Copy)]
pub struct SubAccountEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> SubAccountEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// List sub-accounts
    #[instrument(skip(self, options))]
    pub async fn list(&self, options: &SubAccountListOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/list", options)
            .await
    }

    /// Create a virtual sub-account
    ///
    /// The string is used to build the virtual email address.
    #[instrument(skip(self, options))]
    pub async fn create(&self, sub_account_string: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        require("subAccountString", sub_account_string)?;
        let params = Params::new()
            .with("subAccountString", sub_account_string)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/virtualSubAccount", params)
            .await
    }

    /// Spot asset balances of a sub-account
    #[instrument(skip(self, options))]
    pub async fn assets(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v3/sub-account/assets", email, options)
            .await
    }

    /// BTC valuation summary of every sub-account's spot assets
    #[instrument(skip(self, options))]
    pub async fn spot_summary(&self, options: &SpotSummaryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/spotSummary", options)
            .await
    }

    /// Margin and futures enablement status
    #[instrument(skip(self, options))]
    pub async fn status(&self, options: &EmailFilterOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/status", options)
            .await
    }

    /// Deposit address of a sub-account
    #[instrument(skip(self, options))]
    pub async fn deposit_address(
        &self,
        email: &str,
        coin: &str,
        options: &SubDepositAddressOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("coin", coin)?;
        let params = Params::new()
            .with("email", email)
            .with("coin", coin)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/capital/deposit/subAddress", params)
            .await
    }

    /// Deposit history of a sub-account
    #[instrument(skip(self, options))]
    pub async fn deposit_history(&self, email: &str, options: &SubDepositHistoryOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v1/capital/deposit/subHisrec", email, options)
            .await
    }

    /// Enable leveraged tokens for a sub-account
    #[instrument(skip(self, options))]
    pub async fn enable_leverage_token(
        &self,
        email: &str,
        enable_blvt: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        let params = Params::new()
            .with("email", email)
            .with("enableBlvt", enable_blvt)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/blvt/enable", params)
            .await
    }

    // ========================================================================
    // Margin and futures accounts
    // ========================================================================

    /// Enable margin for a sub-account
    #[instrument(skip(self, options))]
    pub async fn enable_margin(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::POST, "/sapi/v1/sub-account/margin/enable", email, options)
            .await
    }

    /// Margin account details of a sub-account
    #[instrument(skip(self, options))]
    pub async fn margin_account(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v1/sub-account/margin/account", email, options)
            .await
    }

    /// Margin summary across sub-accounts
    #[instrument(skip(self, options))]
    pub async fn margin_account_summary(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/margin/accountSummary", options)
            .await
    }

    /// Enable futures for a sub-account
    #[instrument(skip(self, options))]
    pub async fn enable_futures(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::POST, "/sapi/v1/sub-account/futures/enable", email, options)
            .await
    }

    /// USD-M futures account of a sub-account
    #[instrument(skip(self, options))]
    pub async fn futures_account(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v1/sub-account/futures/account", email, options)
            .await
    }

    /// USD-M futures summary across sub-accounts
    #[instrument(skip(self, options))]
    pub async fn futures_account_summary(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/futures/accountSummary", options)
            .await
    }

    /// USD-M futures positions of a sub-account
    #[instrument(skip(self, options))]
    pub async fn futures_position_risk(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v1/sub-account/futures/positionRisk", email, options)
            .await
    }

    /// Futures account of a sub-account, USD-M or COIN-M
    #[instrument(skip(self, options))]
    pub async fn futures_account_v2(
        &self,
        email: &str,
        futures_type: FuturesType,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_email_and_futures_type(
            Method::GET,
            "/sapi/v2/sub-account/futures/account",
            email,
            futures_type,
            options,
        )
        .await
    }

    /// Futures summary across sub-accounts, USD-M or COIN-M
    #[instrument(skip(self, options))]
    pub async fn futures_account_summary_v2(
        &self,
        futures_type: FuturesType,
        options: &FuturesSummaryOptions,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("futuresType", futures_type.as_u8())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v2/sub-account/futures/accountSummary", params)
            .await
    }

    /// Futures positions of a sub-account, USD-M or COIN-M
    #[instrument(skip(self, options))]
    pub async fn futures_position_risk_v2(
        &self,
        email: &str,
        futures_type: FuturesType,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.with_email_and_futures_type(
            Method::GET,
            "/sapi/v2/sub-account/futures/positionRisk",
            email,
            futures_type,
            options,
        )
        .await
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// Sub-account spot transfer history
    #[instrument(skip(self, options))]
    pub async fn transfer_history(&self, options: &SubTransferHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/sub/transfer/history", options)
            .await
    }

    /// Transfer between a sub-account's spot and USD-M/COIN-M futures wallets
    ///
    /// # Arguments
    /// * `transfer_type` - 1 spot to USD-M, 2 USD-M to spot, 3 spot to COIN-M, 4 COIN-M to spot
    #[instrument(skip(self, options))]
    pub async fn futures_transfer(
        &self,
        email: &str,
        asset: &str,
        amount: Decimal,
        transfer_type: u8,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.wallet_transfer(
            "/sapi/v1/sub-account/futures/transfer",
            email,
            asset,
            amount,
            transfer_type,
            options,
        )
        .await
    }

    /// Transfer between a sub-account's spot and margin wallets
    ///
    /// # Arguments
    /// * `transfer_type` - 1 spot to margin, 2 margin to spot
    #[instrument(skip(self, options))]
    pub async fn margin_transfer(
        &self,
        email: &str,
        asset: &str,
        amount: Decimal,
        transfer_type: u8,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.wallet_transfer(
            "/sapi/v1/sub-account/margin/transfer",
            email,
            asset,
            amount,
            transfer_type,
            options,
        )
        .await
    }

    /// Transfer from the calling sub-account to another sub-account
    #[instrument(skip(self, options))]
    pub async fn transfer_to_sub(
        &self,
        to_email: &str,
        asset: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("toEmail", to_email)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("toEmail", to_email)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/transfer/subToSub", params)
            .await
    }

    /// Transfer from the calling sub-account to its master
    #[instrument(skip(self, options))]
    pub async fn transfer_to_master(
        &self,
        asset: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/transfer/subToMaster", params)
            .await
    }

    /// Transfer history of the calling sub-account
    #[instrument(skip(self, options))]
    pub async fn sub_user_transfer_history(&self, options: &SubUserHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/transfer/subUserHistory", options)
            .await
    }

    /// Futures asset transfer history of a sub-account
    #[instrument(skip(self, options))]
    pub async fn futures_asset_transfer_history(
        &self,
        email: &str,
        futures_type: FuturesType,
        options: &FuturesInternalTransferHistoryOptions,
    ) -> RestResult<Value> {
        self.with_email_and_futures_type(
            Method::GET,
            "/sapi/v1/sub-account/futures/internalTransfer",
            email,
            futures_type,
            options,
        )
        .await
    }

    /// Transfer futures assets between two sub-accounts
    #[instrument(skip(self, options))]
    pub async fn futures_asset_transfer(
        &self,
        from_email: &str,
        to_email: &str,
        futures_type: FuturesType,
        asset: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("fromEmail", from_email)?;
        require("toEmail", to_email)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("fromEmail", from_email)
            .with("toEmail", to_email)
            .with("futuresType", futures_type.as_u8())
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/futures/internalTransfer", params)
            .await
    }

    /// Universal transfer between master and sub-account wallets
    ///
    /// # Arguments
    /// * `from_account_type`, `to_account_type` - "SPOT", "USDT_FUTURE",
    ///   "COIN_FUTURE", "MARGIN" or "ISOLATED_MARGIN"
    #[instrument(skip(self, options))]
    pub async fn universal_transfer(
        &self,
        from_account_type: &str,
        to_account_type: &str,
        asset: &str,
        amount: Decimal,
        options: &SubUniversalTransferOptions,
    ) -> RestResult<Value> {
        require("fromAccountType", from_account_type)?;
        require("toAccountType", to_account_type)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("fromAccountType", from_account_type)
            .with("toAccountType", to_account_type)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/universalTransfer", params)
            .await
    }

    /// Universal transfer history
    #[instrument(skip(self, options))]
    pub async fn universal_transfer_history(
        &self,
        options: &SubUniversalTransferHistoryOptions,
    ) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/sub-account/universalTransfer", options)
            .await
    }

    // ========================================================================
    // Managed sub-accounts
    // ========================================================================

    /// Deposit into a managed sub-account
    #[instrument(skip(self, options))]
    pub async fn managed_deposit(
        &self,
        to_email: &str,
        asset: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("toEmail", to_email)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("toEmail", to_email)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/managed-subaccount/deposit", params)
            .await
    }

    /// Assets of a managed sub-account
    #[instrument(skip(self, options))]
    pub async fn managed_assets(&self, email: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_email(Method::GET, "/sapi/v1/managed-subaccount/asset", email, options)
            .await
    }

    /// Withdraw from a managed sub-account
    #[instrument(skip(self, options))]
    pub async fn managed_withdraw(
        &self,
        from_email: &str,
        asset: &str,
        amount: Decimal,
        options: &ManagedWithdrawOptions,
    ) -> RestResult<Value> {
        require("fromEmail", from_email)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("fromEmail", from_email)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/managed-subaccount/withdraw", params)
            .await
    }

    /// Daily snapshot of a managed sub-account
    ///
    /// # Arguments
    /// * `account_type` - "SPOT", "MARGIN" or "FUTURES"
    #[instrument(skip(self, options))]
    pub async fn managed_snapshot(
        &self,
        email: &str,
        account_type: &str,
        options: &SignedFilterOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("type", account_type)?;
        let params = Params::new()
            .with("email", email)
            .with("type", account_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/managed-subaccount/accountSnapshot", params)
            .await
    }

    // ========================================================================
    // Sub-account API keys
    // ========================================================================

    /// Turn IP restriction on or off for a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn api_toggle_ip_restriction(
        &self,
        email: &str,
        sub_account_api_key: &str,
        ip_restrict: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("subAccountApiKey", sub_account_api_key)?;
        let params = Params::new()
            .with("email", email)
            .with("subAccountApiKey", sub_account_api_key)
            .with("ipRestrict", ip_restrict)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/sub-account/subAccountApi/ipRestriction", params)
            .await
    }

    /// Add an IP to a sub-account API key's allow list
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn api_add_ip(
        &self,
        email: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.api_ip_list(Method::POST, email, sub_account_api_key, ip_address, options)
            .await
    }

    /// IP restriction of a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn api_get_ip_restriction(
        &self,
        email: &str,
        sub_account_api_key: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("subAccountApiKey", sub_account_api_key)?;
        let params = Params::new()
            .with("email", email)
            .with("subAccountApiKey", sub_account_api_key)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/sub-account/subAccountApi/ipRestriction", params)
            .await
    }

    /// Remove an IP from a sub-account API key's allow list
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn api_delete_ip(
        &self,
        email: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.api_ip_list(Method::DELETE, email, sub_account_api_key, ip_address, options)
            .await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn with_email<O: Serialize>(
        &self,
        method: Method,
        path: &str,
        email: &str,
        options: &O,
    ) -> RestResult<Value> {
        require("email", email)?;
        let params = Params::new().with("email", email).merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }

    async fn with_email_and_futures_type<O: Serialize>(
        &self,
        method: Method,
        path: &str,
        email: &str,
        futures_type: FuturesType,
        options: &O,
    ) -> RestResult<Value> {
        require("email", email)?;
        let params = Params::new()
            .with("email", email)
            .with("futuresType", futures_type.as_u8())
            .merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }

    async fn wallet_transfer(
        &self,
        path: &str,
        email: &str,
        asset: &str,
        amount: Decimal,
        transfer_type: u8,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("asset", asset)?;
        let params = Params::new()
            .with("email", email)
            .with("asset", asset)
            .with("amount", amount.to_string())
            .with("type", transfer_type)
            .merge_options(options)?;
        self.dispatcher.signed(Method::POST, path, params).await
    }

    async fn api_ip_list(
        &self,
        method: Method,
        email: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("email", email)?;
        require("subAccountApiKey", sub_account_api_key)?;
        require("ipAddress", ip_address)?;
        let params = Params::new()
            .with("email", email)
            .with("subAccountApiKey", sub_account_api_key)
            .with("ipAddress", ip_address)
            .merge_options(options)?;
        self.dispatcher
            .signed(
                method,
                "/sapi/v1/sub-account/subAccountApi/ipRestriction/ipList",
                params,
            )
            .await
    }
}
