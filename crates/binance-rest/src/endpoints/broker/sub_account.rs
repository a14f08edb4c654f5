//! Broker sub-accounts, their API keys and account flags

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{api_key_params, BrokerEndpoints};
use crate::endpoints::RecvWindowOptions;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    CreateSubAccountOptions {
        /// Free-form label, at most 50 characters
        tag: String,
        recv_window: u64,
    }
}

options! {
    BrokerSubAccountOptions {
        sub_account_id: String,
        page: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    CreateApiKeyOptions {
        /// `"true"` or `"false"`
        margin_trade: String,
        /// `"true"` or `"false"`
        futures_trade: String,
        recv_window: u64,
    }
}

options! {
    QueryApiKeyOptions {
        sub_account_api_key: String,
        page: u32,
        size: u32,
        recv_window: u64,
    }
}

/// Permissions granted to a sub-account API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApiKeyPermissions {
    pub can_trade: bool,
    pub margin_trade: bool,
    pub futures_trade: bool,
}

impl<'a> BrokerEndpoints<'a> {
    // ========================================================================
    // Sub-accounts
    // ========================================================================

    /// Create a broker sub-account
    #[instrument(skip(self, options))]
    pub async fn create_sub_account(&self, options: &CreateSubAccountOptions) -> RestResult<Value> {
        let response: Value = self
            .dispatcher
            .signed_options(Method::POST, "/sapi/v1/broker/subAccount", options)
            .await?;
        debug!(sub_account_id = ?response.get("subaccountId"), "Broker sub-account created");
        Ok(response)
    }

    /// List broker sub-accounts
    #[instrument(skip(self, options))]
    pub async fn sub_accounts(&self, options: &BrokerSubAccountOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/subAccount", options)
            .await
    }

    /// Enable margin for a sub-account (cannot be disabled)
    #[instrument(skip(self, options))]
    pub async fn enable_margin(&self, sub_account_id: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.enable_flag("/sapi/v1/broker/subAccount/margin", sub_account_id, "margin", options)
            .await
    }

    /// Enable futures for a sub-account (cannot be disabled)
    #[instrument(skip(self, options))]
    pub async fn enable_futures(&self, sub_account_id: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.enable_flag("/sapi/v1/broker/subAccount/futures", sub_account_id, "futures", options)
            .await
    }

    /// Enable leveraged tokens for a sub-account
    #[instrument(skip(self, options))]
    pub async fn enable_leverage_token(
        &self,
        sub_account_id: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.enable_flag("/sapi/v1/broker/subAccount/blvt", sub_account_id, "blvt", options)
            .await
    }

    async fn enable_flag(
        &self,
        path: &str,
        sub_account_id: &str,
        flag: &'static str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with(flag, "true")
            .merge_options(options)?;
        self.dispatcher.signed(Method::POST, path, params).await
    }

    /// Broker account information
    #[instrument(skip(self, options))]
    pub async fn info(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/broker/info", options)
            .await
    }

    // ========================================================================
    // API keys
    // ========================================================================

    /// Create an API key for a sub-account
    ///
    /// The response carries the new key's secret; it is returned untouched
    /// and never logged.
    #[instrument(skip(self, options))]
    pub async fn create_api_key(
        &self,
        sub_account_id: &str,
        can_trade: bool,
        options: &CreateApiKeyOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with("canTrade", can_trade.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/subAccountApi", params)
            .await
    }

    /// Delete a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn delete_api_key(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::DELETE, "/sapi/v1/broker/subAccountApi", params)
            .await
    }

    /// API keys of a sub-account
    #[instrument(skip(self, options))]
    pub async fn query_api_key(&self, sub_account_id: &str, options: &QueryApiKeyOptions) -> RestResult<Value> {
        self.with_sub_account(Method::GET, "/sapi/v1/broker/subAccountApi", sub_account_id, options)
            .await
    }

    /// Change the trading permissions of a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn change_permission(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        permissions: ApiKeyPermissions,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?
            .with("canTrade", permissions.can_trade.to_string())
            .with("marginTrade", permissions.margin_trade.to_string())
            .with("futuresTrade", permissions.futures_trade.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/subAccountApi/permission", params)
            .await
    }

    /// Allow or forbid universal transfer for a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn enable_universal_transfer(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        can_universal_transfer: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?
            .with("canUniversalTransfer", can_universal_transfer.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(
                Method::POST,
                "/sapi/v1/broker/subAccountApi/permission/universalTransfer",
                params,
            )
            .await
    }

    /// Allow or forbid vanilla options trading for a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn enable_vanilla_options(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        can_vanilla_options: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?
            .with("canVanillaOptions", can_vanilla_options.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(
                Method::POST,
                "/sapi/v1/broker/subAccountApi/permission/vanillaOptions",
                params,
            )
            .await
    }

    // ========================================================================
    // IP restriction
    // ========================================================================

    /// Turn IP restriction on or off for a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn change_ip_restriction(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        ip_restrict: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?
            .with("ipRestrict", ip_restrict.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/subAccountApi/ipRestriction", params)
            .await
    }

    /// IP restriction of a sub-account API key
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn ip_restriction(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/broker/subAccountApi/ipRestriction", params)
            .await
    }

    /// Add an IP to a sub-account API key's allow list
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn add_ip_restriction(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.ip_list(Method::POST, sub_account_id, sub_account_api_key, ip_address, options)
            .await
    }

    /// Remove an IP from a sub-account API key's allow list
    #[instrument(skip(self, sub_account_api_key, options))]
    pub async fn delete_ip_restriction(
        &self,
        sub_account_id: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.ip_list(Method::DELETE, sub_account_id, sub_account_api_key, ip_address, options)
            .await
    }

    async fn ip_list(
        &self,
        method: Method,
        sub_account_id: &str,
        sub_account_api_key: &str,
        ip_address: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = api_key_params(sub_account_id, sub_account_api_key)?;
        require("ipAddress", ip_address)?;
        let params = params.with("ipAddress", ip_address).merge_options(options)?;
        self.dispatcher
            .signed(method, "/sapi/v1/broker/subAccountApi/ipRestriction/ipList", params)
            .await
    }

    // ========================================================================
    // BNB burn
    // ========================================================================

    /// Use BNB for spot trading fees of a sub-account
    #[instrument(skip(self, options))]
    pub async fn change_spot_bnb_burn(
        &self,
        sub_account_id: &str,
        spot_bnb_burn: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.bnb_burn(
            "/sapi/v1/broker/subAccount/bnbBurn/spot",
            sub_account_id,
            "spotBNBBurn",
            spot_bnb_burn,
            options,
        )
        .await
    }

    /// Use BNB for margin interest of a sub-account
    #[instrument(skip(self, options))]
    pub async fn change_margin_interest_bnb_burn(
        &self,
        sub_account_id: &str,
        interest_bnb_burn: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.bnb_burn(
            "/sapi/v1/broker/subAccount/bnbBurn/marginInterest",
            sub_account_id,
            "interestBNBBurn",
            interest_bnb_burn,
            options,
        )
        .await
    }

    /// BNB burn settings of a sub-account
    #[instrument(skip(self, options))]
    pub async fn bnb_burn_status(&self, sub_account_id: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        self.with_sub_account(
            Method::GET,
            "/sapi/v1/broker/subAccount/bnbBurn/status",
            sub_account_id,
            options,
        )
        .await
    }

    async fn bnb_burn(
        &self,
        path: &str,
        sub_account_id: &str,
        key: &'static str,
        enabled: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with(key, enabled.to_string())
            .merge_options(options)?;
        self.dispatcher.signed(Method::POST, path, params).await
    }
}
