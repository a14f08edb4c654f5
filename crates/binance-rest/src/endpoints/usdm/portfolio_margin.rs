use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::endpoints::futures::SignedSymbolOptions;
use crate::error::RestResult;

/// Portfolio margin endpoints on the USD-M host
#[derive(Debug, Clone, Copy)]
pub struct UsdMPortfolioMarginEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> UsdMPortfolioMarginEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Portfolio margin exchange information
    #[instrument(skip(self, options))]
    pub async fn exchange_info(&self, options: &SignedSymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/fapi/v1/pmExchangeInfo", options)
            .await
    }
}
