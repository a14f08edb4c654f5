//! USD-M futures market data (`fapi` host)

use binance_types::{ContractType, FuturesPeriod, KlineInterval};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::futures::{FundingRateHistoryOptions, SymbolOptions};
use crate::endpoints::spot::market::{AggTradesOptions, HistoricalTradesOptions};
use crate::endpoints::{FilterOptions, LimitOptions};
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{EmptyResponse, OrderBook, ServerTime};
use crate::validation::require;

/// USD-M market data endpoints
#[derive(Debug, Clone, Copy)]
pub struct UsdMMarketEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> UsdMMarketEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<EmptyResponse> {
        self.dispatcher
            .public(Method::GET, "/fapi/v1/ping", Params::new())
            .await
    }

    /// Server time
    #[instrument(skip(self))]
    pub async fn time(&self) -> RestResult<ServerTime> {
        self.dispatcher
            .public(Method::GET, "/fapi/v1/time", Params::new())
            .await
    }

    /// Trading rules and symbol information
    #[instrument(skip(self))]
    pub async fn exchange_info(&self) -> RestResult<Value> {
        self.dispatcher
            .public(Method::GET, "/fapi/v1/exchangeInfo", Params::new())
            .await
    }

    /// Order book snapshot
    ///
    /// # Arguments
    /// * `options` - `limit`: 5, 10, 20, 50, 100, 500 or 1000
    #[instrument(skip(self, options))]
    pub async fn depth(&self, symbol: &str, options: &LimitOptions) -> RestResult<OrderBook> {
        let book: OrderBook = self.with_symbol("/fapi/v1/depth", symbol, options).await?;
        debug!(last_update_id = book.last_update_id, "Fetched futures order book");
        Ok(book)
    }

    /// Recent trades
    #[instrument(skip(self, options))]
    pub async fn trades(&self, symbol: &str, options: &LimitOptions) -> RestResult<Value> {
        self.with_symbol("/fapi/v1/trades", symbol, options).await
    }

    /// Older trades (sends the API key)
    #[instrument(skip(self, options))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        options: &HistoricalTradesOptions,
    ) -> RestResult<Value> {
        self.with_symbol("/fapi/v1/historicalTrades", symbol, options)
            .await
    }

    /// Compressed, aggregate trades
    #[instrument(skip(self, options))]
    pub async fn agg_trades(&self, symbol: &str, options: &AggTradesOptions) -> RestResult<Value> {
        self.with_symbol("/fapi/v1/aggTrades", symbol, options).await
    }

    /// Kline bars of a symbol
    #[instrument(skip(self, options))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("interval", interval.as_str())
            .merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/fapi/v1/klines", params)
            .await
    }

    /// Kline bars of a continuous contract
    #[instrument(skip(self, options))]
    pub async fn continuous_klines(
        &self,
        pair: &str,
        contract_type: ContractType,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require("pair", pair)?;
        let params = Params::new()
            .with("pair", pair.to_uppercase())
            .with("contractType", contract_type.as_str())
            .with("interval", interval.as_str())
            .merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/fapi/v1/continuousKlines", params)
            .await
    }

    /// Index price kline bars of a pair
    #[instrument(skip(self, options))]
    pub async fn index_price_klines(
        &self,
        pair: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.interval_klines("/fapi/v1/indexPriceKlines", "pair", pair, interval, options)
            .await
    }

    /// Mark price kline bars of a symbol
    #[instrument(skip(self, options))]
    pub async fn mark_price_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.interval_klines("/fapi/v1/markPriceKlines", "symbol", symbol, interval, options)
            .await
    }

    /// Mark price and funding rate
    #[instrument(skip(self, options))]
    pub async fn mark_price(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/premiumIndex", options)
            .await
    }

    /// Funding rate history
    #[instrument(skip(self, options))]
    pub async fn funding_rate_history(&self, options: &FundingRateHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/fundingRate", options)
            .await
    }

    /// 24 hour rolling window statistics
    #[instrument(skip(self, options))]
    pub async fn ticker_24hr(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/ticker/24hr", options)
            .await
    }

    /// Latest price
    #[instrument(skip(self, options))]
    pub async fn ticker_price(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/ticker/price", options)
            .await
    }

    /// Best bid/ask
    #[instrument(skip(self, options))]
    pub async fn book_ticker(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/ticker/bookTicker", options)
            .await
    }

    /// Present open interest of a symbol
    #[instrument(skip(self))]
    pub async fn open_interest(&self, symbol: &str) -> RestResult<Value> {
        self.with_symbol("/fapi/v1/openInterest", symbol, &()).await
    }

    /// Open interest history
    #[instrument(skip(self, options))]
    pub async fn open_interest_hist(
        &self,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.period_stats("/futures/data/openInterestHist", symbol, period, options)
            .await
    }

    /// Long/short account ratio of top traders
    #[instrument(skip(self, options))]
    pub async fn top_long_short_account_ratio(
        &self,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.period_stats("/futures/data/topLongShortAccountRatio", symbol, period, options)
            .await
    }

    /// Long/short position ratio of top traders
    #[instrument(skip(self, options))]
    pub async fn top_long_short_position_ratio(
        &self,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.period_stats("/futures/data/topLongShortPositionRatio", symbol, period, options)
            .await
    }

    /// Long/short ratio of all accounts
    #[instrument(skip(self, options))]
    pub async fn global_long_short_account_ratio(
        &self,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.period_stats("/futures/data/globalLongShortAccountRatio", symbol, period, options)
            .await
    }

    /// Taker buy/sell volume
    #[instrument(skip(self, options))]
    pub async fn taker_long_short_ratio(
        &self,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.period_stats("/futures/data/takerlongshortRatio", symbol, period, options)
            .await
    }

    /// Historical BLVT NAV kline bars
    #[instrument(skip(self, options))]
    pub async fn blvt_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.interval_klines("/fapi/v1/lvtKlines", "symbol", symbol, interval, options)
            .await
    }

    /// Composite index constituents
    #[instrument(skip(self, options))]
    pub async fn index_info(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/indexInfo", options)
            .await
    }

    /// Asset index for multi-assets mode
    #[instrument(skip(self, options))]
    pub async fn asset_index(&self, options: &SymbolOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/fapi/v1/assetIndex", options)
            .await
    }

    async fn with_symbol<T, O>(&self, path: &str, symbol: &str, options: &O) -> RestResult<T>
    where
        T: serde::de::DeserializeOwned,
        O: Serialize,
    {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        self.dispatcher.public(Method::GET, path, params).await
    }

    async fn interval_klines(
        &self,
        path: &str,
        key: &'static str,
        value: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require(key, value)?;
        let params = Params::new()
            .with(key, value.to_uppercase())
            .with("interval", interval.as_str())
            .merge_options(options)?;
        self.dispatcher.public(Method::GET, path, params).await
    }

    async fn period_stats(
        &self,
        path: &str,
        symbol: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("period", period.as_str())
            .merge_options(options)?;
        self.dispatcher.public(Method::GET, path, params).await
    }
}
