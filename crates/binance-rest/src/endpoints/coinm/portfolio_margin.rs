use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;

options! {
    PortfolioMarginExchangeInfoOptions {
        pair: String,
        recv_window: u64,
    }
}

/// Portfolio margin endpoints on the COIN-M host
#[derive(Debug, Clone, Copy)]
pub struct CoinMPortfolioMarginEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> CoinMPortfolioMarginEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Portfolio margin exchange information, optionally for one pair
    #[instrument(skip(self, options))]
    pub async fn exchange_info(&self, options: &PortfolioMarginExchangeInfoOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/dapi/v1/pmExchangeInfo", options)
            .await
    }
}
