//! Binance leveraged tokens

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::endpoints::RecvWindowOptions;
use crate::error::RestResult;
use crate::params::Params;
use crate::validation::require;

options! {
    BlvtInfoOptions {
        /// e.g. "BTCDOWN"
        token_name: String,
    }
}

options! {
    /// Subscription or redemption record filter
    BlvtRecordOptions {
        token_name: String,
        id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

/// Leveraged token endpoints
#[derive(Debug, Clone, Copy)]
pub struct BlvtEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> BlvtEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Token information (API key only)
    #[instrument(skip(self, options))]
    pub async fn info(&self, options: &BlvtInfoOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/sapi/v1/blvt/tokenInfo", options)
            .await
    }

    /// Subscribe to a token, spending `cost` in USDT
    #[instrument(skip(self, options))]
    pub async fn subscribe(
        &self,
        token_name: &str,
        cost: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("tokenName", token_name)?;
        let params = Params::new()
            .with("tokenName", token_name)
            .with("cost", cost.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/blvt/subscribe", params)
            .await
    }

    /// Subscription records
    #[instrument(skip(self, options))]
    pub async fn subscription_record(&self, options: &BlvtRecordOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/blvt/subscribe/record", options)
            .await
    }

    /// Redeem an amount of a token
    #[instrument(skip(self, options))]
    pub async fn redeem(
        &self,
        token_name: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("tokenName", token_name)?;
        let params = Params::new()
            .with("tokenName", token_name)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/blvt/redeem", params)
            .await
    }

    /// Redemption records
    #[instrument(skip(self, options))]
    pub async fn redemption_record(&self, options: &BlvtRecordOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/blvt/redeem/record", options)
            .await
    }
}
