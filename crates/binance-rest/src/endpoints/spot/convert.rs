//! Convert: quote-based asset conversion

use binance_types::ConvertValidTime;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::RecvWindowOptions;
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::validation::require;

options! {
    QuoteRequestOptions {
        /// Quote validity, 10s when unset
        valid_time: ConvertValidTime,
        recv_window: u64,
    }
}

options! {
    ConvertHistoryOptions {
        /// Max 1000
        limit: u32,
        recv_window: u64,
    }
}

/// Which side of a conversion the caller fixes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteAmount {
    /// Amount deducted from the source asset
    From(Decimal),
    /// Amount credited in the target asset
    To(Decimal),
}

/// Convert endpoints
#[derive(Debug, Clone, Copy)]
pub struct ConvertEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> ConvertEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Convertible pairs between two assets
    #[instrument(skip(self))]
    pub async fn list_all_pairs(&self, from_asset: &str, to_asset: &str) -> RestResult<Value> {
        require("fromAsset", from_asset)?;
        require("toAsset", to_asset)?;
        let params = Params::new()
            .with("fromAsset", from_asset)
            .with("toAsset", to_asset);
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/convert/exchangeInfo", params)
            .await
    }

    /// Quantity precision per asset
    #[instrument(skip(self, options))]
    pub async fn order_quantity_precision(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/convert/exchangeInfo", options)
            .await
    }

    /// Request a conversion quote
    #[instrument(skip(self, options))]
    pub async fn send_quote_request(
        &self,
        from_asset: &str,
        to_asset: &str,
        amount: QuoteAmount,
        options: &QuoteRequestOptions,
    ) -> RestResult<Value> {
        require("fromAsset", from_asset)?;
        require("toAsset", to_asset)?;
        let params = Params::new()
            .with("fromAsset", from_asset)
            .with("toAsset", to_asset);
        let params = match amount {
            QuoteAmount::From(value) => params.with("fromAmount", value.to_string()),
            QuoteAmount::To(value) => params.with("toAmount", value.to_string()),
        }
        .merge_options(options)?;

        self.dispatcher
            .signed(Method::POST, "/sapi/v1/convert/getQuote", params)
            .await
    }

    /// Accept a previously requested quote
    #[instrument(skip(self, options))]
    pub async fn accept_quote(&self, quote_id: &str, options: &RecvWindowOptions) -> RestResult<Value> {
        require("quoteId", quote_id)?;
        let params = Params::new().with("quoteId", quote_id).merge_options(options)?;
        let response: Value = self
            .dispatcher
            .signed(Method::POST, "/sapi/v1/convert/acceptQuote", params)
            .await?;
        debug!(order_id = ?response.get("orderId"), "Quote accepted");
        Ok(response)
    }

    /// Status of a conversion order
    #[instrument(skip(self))]
    pub async fn order_status(&self, order_id: &str) -> RestResult<Value> {
        require("orderId", order_id)?;
        let params = Params::new().with("orderId", order_id);
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/convert/orderStatus", params)
            .await
    }

    /// Conversion history between two timestamps (at most 30 days apart)
    #[instrument(skip(self, options))]
    pub async fn trade_history(
        &self,
        start_time: u64,
        end_time: u64,
        options: &ConvertHistoryOptions,
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
            .signed(Method::GET, "/sapi/v1/convert/tradeFlow", params)
            .await
    }
}
