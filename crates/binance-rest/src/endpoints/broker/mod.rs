//! Broker program endpoints (`/sapi/v1/broker`)
//!
//! Broker sub-accounts are addressed by `subAccountId`, not email. Boolean
//! flags go on the wire as `"true"`/`"false"`.

mod commission;
mod sub_account;
mod transfer;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

pub use commission::{
    BrokerRebateOptions, PairCommissionOptions, SpotCommissionOptions, SymbolCommissionOptions,
};
pub use sub_account::{
    ApiKeyPermissions, BrokerSubAccountOptions, CreateApiKeyOptions, CreateSubAccountOptions,
    QueryApiKeyOptions,
};
pub use transfer::{
    BrokerFuturesTransferHistoryOptions, BrokerTransferHistoryOptions, BrokerTransferOptions,
    BrokerUniversalTransferHistoryOptions, BrokerUniversalTransferOptions, SubAssetOptions,
    SubDepositHistoryOptions,
};

/// Broker endpoints
#[derive(Debug, Clone, Copy)]
pub struct BrokerEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> BrokerEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Signed call whose only required argument is the sub-account id
    async fn with_sub_account<O: Serialize>(
        &self,
        method: Method,
        path: &str,
        sub_account_id: &str,
        options: &O,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .merge_options(options)?;
        self.dispatcher.signed(method, path, params).await
    }
}

/// Validated leading parameters for calls on a sub-account API key
fn api_key_params(sub_account_id: &str, sub_account_api_key: &str) -> RestResult<Params> {
    require("subAccountId", sub_account_id)?;
    require("subAccountApiKey", sub_account_api_key)?;
    Ok(Params::new()
        .with("subAccountId", sub_account_id)
        .with("subAccountApiKey", sub_account_api_key))
}
