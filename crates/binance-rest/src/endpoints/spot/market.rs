//! Public spot market data endpoints
//!
//! These endpoints don't require a signature. Symbols are uppercased before
//! dispatch.

use binance_types::KlineInterval;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::endpoints::{FilterOptions, LimitOptions};
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{AvgPrice, EmptyResponse, OrderBook, ServerTime};
use crate::validation::require;

options! {
    /// Filter for `exchangeInfo`
    ExchangeInfoOptions {
        symbol: String,
        symbols: Vec<String>,
    }
}

options! {
    /// Paging for `historicalTrades`
    HistoricalTradesOptions {
        limit: u32,
        from_id: u64,
    }
}

options! {
    /// Paging for `aggTrades`
    AggTradesOptions {
        from_id: u64,
        start_time: u64,
        end_time: u64,
        limit: u32,
    }
}

/// Public market data endpoints
#[derive(Debug, Clone, Copy)]
pub struct MarketEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Test connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<EmptyResponse> {
        self.dispatcher
            .public(Method::GET, "/api/v3/ping", Params::new())
            .await
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn time(&self) -> RestResult<ServerTime> {
        let time: ServerTime = self
            .dispatcher
            .public(Method::GET, "/api/v3/time", Params::new())
            .await?;
        debug!(server_time = time.server_time, "Fetched server time");
        Ok(time)
    }

    /// Exchange trading rules and symbol information
    #[instrument(skip(self, options))]
    pub async fn exchange_info(&self, options: &ExchangeInfoOptions) -> RestResult<Value> {
        let params = Params::new().merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/api/v3/exchangeInfo", params)
            .await
    }

    /// Order book snapshot
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "BTCUSDT")
    /// * `options` - `limit`: 5, 10, 20, 50, 100, 500, 1000 or 5000
    #[instrument(skip(self, options))]
    pub async fn depth(&self, symbol: &str, options: &LimitOptions) -> RestResult<OrderBook> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        let book: OrderBook = self
            .dispatcher
            .public(Method::GET, "/api/v3/depth", params)
            .await?;
        debug!(
            bids = book.bids.len(),
            asks = book.asks.len(),
            "Fetched order book"
        );
        Ok(book)
    }

    /// Recent trades
    #[instrument(skip(self, options))]
    pub async fn trades(&self, symbol: &str, options: &LimitOptions) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/api/v3/trades", params)
            .await
    }

    /// Older trades (sends the API key)
    #[instrument(skip(self, options))]
    pub async fn historical_trades(
        &self,
        symbol: &str,
        options: &HistoricalTradesOptions,
    ) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/api/v3/historicalTrades", params)
            .await
    }

    /// Compressed, aggregate trades
    #[instrument(skip(self, options))]
    pub async fn agg_trades(&self, symbol: &str, options: &AggTradesOptions) -> RestResult<Value> {
        require("symbol", symbol)?;
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .merge_options(options)?;
        self.dispatcher
            .public(Method::GET, "/api/v3/aggTrades", params)
            .await
    }

    /// Kline/candlestick bars
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
            .public(Method::GET, "/api/v3/klines", params)
            .await
    }

    /// Current average price
    #[instrument(skip(self))]
    pub async fn avg_price(&self, symbol: &str) -> RestResult<AvgPrice> {
        require("symbol", symbol)?;
        let params = Params::new().with("symbol", symbol.to_uppercase());
        self.dispatcher
            .public(Method::GET, "/api/v3/avgPrice", params)
            .await
    }

    /// 24 hour rolling window price change statistics
    ///
    /// Pass an empty `symbol` and no `symbols` for every symbol.
    #[instrument(skip(self))]
    pub async fn ticker_24hr(&self, symbol: &str, symbols: &[&str]) -> RestResult<Value> {
        self.ticker("/api/v3/ticker/24hr", symbol, symbols).await
    }

    /// Latest price for one, several or all symbols
    #[instrument(skip(self))]
    pub async fn ticker_price(&self, symbol: &str, symbols: &[&str]) -> RestResult<Value> {
        self.ticker("/api/v3/ticker/price", symbol, symbols).await
    }

    /// Best bid/ask for one, several or all symbols
    #[instrument(skip(self))]
    pub async fn book_ticker(&self, symbol: &str, symbols: &[&str]) -> RestResult<Value> {
        self.ticker("/api/v3/ticker/bookTicker", symbol, symbols).await
    }

    async fn ticker(&self, path: &str, symbol: &str, symbols: &[&str]) -> RestResult<Value> {
        let params = Params::new()
            .with("symbol", symbol.to_uppercase())
            .with("symbols", symbols.to_vec());
        self.dispatcher.public(Method::GET, path, params).await
    }
}
