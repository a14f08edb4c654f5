//! COIN-M futures market data (`dapi` host)
//!
//! Statistics endpoints here are keyed by pair (e.g. "BTCUSD") rather than by
//! contract symbol (e.g. "BTCUSD_PERP").

use binance_types::{ContractType, FuturesPeriod, KlineInterval};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::futures::FundingRateHistoryOptions;
use crate::endpoints::spot::market::{AggTradesOptions, HistoricalTradesOptions};
use crate::endpoints::{FilterOptions, LimitOptions};
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{EmptyResponse, OrderBook, ServerTime};
use crate::validation::require;

options! {
    /// Filter by contract symbol or by pair
    SymbolPairOptions {
        symbol: String,
        pair: String,
    }
}

/// COIN-M market data endpoints
#[derive(Debug, Clone, Copy)]
pub struct CoinMMarketEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> CoinMMarketEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<EmptyResponse> {
        self.dispatcher
            .public(Method::GET, "/dapi/v1/ping", Params::new())
            .await
    }

    /// Server time
    #[instrument(skip(self))]
    pub async fn time(&self) -> RestResult<ServerTime> {
        self.dispatcher
            .public(Method::GET, "/dapi/v1/time", Params::new())
            .await
    }

    /// Trading rules and symbol information
    #[instrument(skip(self))]
    pub async fn exchange_info(&self) -> RestResult<Value> {
        self.dispatcher
            .public(Method::GET, "/dapi/v1/exchangeInfo", Params::new())
            .await
    }

    /// Order book snapshot
    #[instrument(skip(self, options))]
    pub async fn depth(&self, symbol: &str, options: &LimitOptions) -> RestResult<OrderBook> {
        let book: OrderBook = self
            .keyed("/dapi/v1/depth", "symbol", symbol, options)
            .await?;
        debug!(last_update_id = book.last_update_id, "Fetched coin-m order book");
        Ok(book)
    }

    /// Recent trades
    #[instrument(skip(self, options))]
    pub async fn trades(&self, symbol: &str, options: &LimitOptions) -> RestResult<Value> {
        self.keyed("/dapi/v1/trades", "symbol", symbol, options).await
    }

    /// Older trades (sends the API key)
    #[instrument(skip(self, options))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        options: &HistoricalTradesOptions,
    ) -> RestResult<Value> {
        self.keyed("/dapi/v1/historicalTrades", "symbol", symbol, options)
            .await
    }

    /// Compressed, aggregate trades
    #[instrument(skip(self, options))]
    pub async fn agg_trades(&self, symbol: &str, options: &AggTradesOptions) -> RestResult<Value> {
        self.keyed("/dapi/v1/aggTrades", "symbol", symbol, options)
            .await
    }

    /// Index price, mark price and funding rate
    #[instrument(skip(self, options))]
    pub async fn premium_index(&self, options: &SymbolPairOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/dapi/v1/premiumIndex", options)
            .await
    }

    /// Funding rate history of a perpetual contract
    #[instrument(skip(self, options))]
    pub async fn funding_rate_history(&self, options: &FundingRateHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/dapi/v1/fundingRate", options)
            .await
    }

    /// Kline bars of a contract
    #[instrument(skip(self, options))]
    pub async fn klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.interval_klines("/dapi/v1/klines", "symbol", symbol, interval, options)
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
            .public(Method::GET, "/dapi/v1/continuousKlines", params)
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
        self.interval_klines("/dapi/v1/indexPriceKlines", "pair", pair, interval, options)
            .await
    }

    /// Mark price kline bars of a contract
    #[instrument(skip(self, options))]
    pub async fn mark_price_klines(
        &self,
        symbol: &str,
        interval: KlineInterval,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.interval_klines("/dapi/v1/markPriceKlines", "symbol", symbol, interval, options)
            .await
    }

    /// 24 hour rolling window statistics
    #[instrument(skip(self, options))]
    pub async fn ticker_24hr(&self, options: &SymbolPairOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/dapi/v1/ticker/24hr", options)
            .await
    }

    /// Latest price
    #[instrument(skip(self, options))]
    pub async fn ticker_price(&self, options: &SymbolPairOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/dapi/v1/ticker/price", options)
            .await
    }

    /// Best bid/ask
    #[instrument(skip(self, options))]
    pub async fn book_ticker(&self, options: &SymbolPairOptions) -> RestResult<Value> {
        self.dispatcher
            .public_options(Method::GET, "/dapi/v1/ticker/bookTicker", options)
            .await
    }

    /// Present open interest of a contract
    #[instrument(skip(self))]
    pub async fn open_interest(&self, symbol: &str) -> RestResult<Value> {
        self.keyed("/dapi/v1/openInterest", "symbol", symbol, &())
            .await
    }

    /// Open interest history
    #[instrument(skip(self, options))]
    pub async fn open_interest_hist(
        &self,
        pair: &str,
        contract_type: ContractType,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.contract_stats("/futures/data/openInterestHist", pair, contract_type, period, options)
            .await
    }

    /// Long/short account ratio of top traders
    #[instrument(skip(self, options))]
    pub async fn top_long_short_account_ratio(
        &self,
        pair: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.pair_stats("/futures/data/topLongShortAccountRatio", pair, period, options)
            .await
    }

    /// Long/short position ratio of top traders
    #[instrument(skip(self, options))]
    pub async fn top_long_short_position_ratio(
        &self,
        pair: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.pair_stats("/futures/data/topLongShortPositionRatio", pair, period, options)
            .await
    }

    /// Long/short ratio of all accounts
    #[instrument(skip(self, options))]
    pub async fn global_long_short_account_ratio(
        &self,
        pair: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.pair_stats("/futures/data/globalLongShortAccountRatio", pair, period, options)
            .await
    }

    /// Taker buy/sell volume
    #[instrument(skip(self, options))]
    pub async fn taker_buy_sell_vol(
        &self,
        pair: &str,
        contract_type: ContractType,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.contract_stats("/futures/data/takerBuySellVol", pair, contract_type, period, options)
            .await
    }

    /// Basis between futures and index price
    #[instrument(skip(self, options))]
    pub async fn basis(
        &self,
        pair: &str,
        contract_type: ContractType,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        self.contract_stats("/futures/data/basis", pair, contract_type, period, options)
            .await
    }

    async fn keyed<T, O>(&self, path: &str, key: &'static str, value: &str, options: &O) -> RestResult<T>
    where
        T: DeserializeOwned,
        O: Serialize,
    {
        require(key, value)?;
        let params = Params::new()
            .with(key, value.to_uppercase())
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

    async fn pair_stats(
        &self,
        path: &str,
        pair: &str,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require("pair", pair)?;
        let params = Params::new()
            .with("pair", pair.to_uppercase())
            .with("period", period.as_str())
            .merge_options(options)?;
        self.dispatcher.public(Method::GET, path, params).await
    }

    async fn contract_stats(
        &self,
        path: &str,
        pair: &str,
        contract_type: ContractType,
        period: FuturesPeriod,
        options: &FilterOptions,
    ) -> RestResult<Value> {
        require("pair", pair)?;
        let params = Params::new()
            .with("pair", pair.to_uppercase())
            .with("contractType", contract_type.as_str())
            .with("period", period.as_str())
            .merge_options(options)?;
        self.dispatcher.public(Method::GET, path, params).await
    }
}
