//! Listen keys for spot, cross margin and isolated margin user data streams
//!
//! `USER_STREAM` endpoints send the API key but are not signed.

use reqwest::Method;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{EmptyResponse, ListenKey};
use crate::validation::require;

const SPOT_STREAM: &str = "/api/v3/userDataStream";
const MARGIN_STREAM: &str = "/sapi/v1/userDataStream";
const ISOLATED_STREAM: &str = "/sapi/v1/userDataStream/isolated";

/// User data stream endpoints
#[derive(Debug, Clone, Copy)]
pub struct UserStreamEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> UserStreamEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Start a spot user data stream (valid for 60 minutes)
    #[instrument(skip(self))]
    pub async fn create_listen_key(&self) -> RestResult<ListenKey> {
        self.dispatcher
            .keyed(Method::POST, SPOT_STREAM, Params::new())
            .await
    }

    /// Extend a spot listen key by 60 minutes
    #[instrument(skip(self, listen_key))]
    pub async fn renew_listen_key(&self, listen_key: &str) -> RestResult<EmptyResponse> {
        self.keyed(Method::PUT, SPOT_STREAM, listen_key).await
    }

    /// Close a spot user data stream
    #[instrument(skip(self, listen_key))]
    pub async fn close_listen_key(&self, listen_key: &str) -> RestResult<EmptyResponse> {
        self.keyed(Method::DELETE, SPOT_STREAM, listen_key).await
    }

    /// Start a cross margin user data stream
    #[instrument(skip(self))]
    pub async fn create_margin_listen_key(&self) -> RestResult<ListenKey> {
        self.dispatcher
            .keyed(Method::POST, MARGIN_STREAM, Params::new())
            .await
    }

    /// Extend a cross margin listen key
    #[instrument(skip(self, listen_key))]
    pub async fn renew_margin_listen_key(&self, listen_key: &str) -> RestResult<EmptyResponse> {
        self.keyed(Method::PUT, MARGIN_STREAM, listen_key).await
    }

    /// Close a cross margin user data stream
    #[instrument(skip(self, listen_key))]
    pub async fn close_margin_listen_key(&self, listen_key: &str) -> RestResult<EmptyResponse> {
        self.keyed(Method::DELETE, MARGIN_STREAM, listen_key).await
    }

    /// Start an isolated margin user data stream for a symbol
    #[instrument(skip(self))]
    pub async fn create_isolated_margin_listen_key(&self, symbol: &str) -> RestResult<ListenKey> {
        require("symbol", symbol)?;
        let params = Params::new().with("symbol", symbol);
        self.dispatcher
            .keyed(Method::POST, ISOLATED_STREAM, params)
            .await
    }

    /// Extend an isolated margin listen key
    #[instrument(skip(self, listen_key))]
    pub async fn renew_isolated_margin_listen_key(
        &self,
        symbol: &str,
        listen_key: &str,
    ) -> RestResult<EmptyResponse> {
        self.isolated_keyed(Method::PUT, symbol, listen_key).await
    }

    /// Close an isolated margin user data stream
    #[instrument(skip(self, listen_key))]
    pub async fn close_isolated_margin_listen_key(
        &self,
        symbol: &str,
        listen_key: &str,
    ) -> RestResult<EmptyResponse> {
        self.isolated_keyed(Method::DELETE, symbol, listen_key).await
    }

    async fn keyed(&self, method: Method, path: &str, listen_key: &str) -> RestResult<EmptyResponse> {
        require("listenKey", listen_key)?;
        let params = Params::new().with("listenKey", listen_key);
        self.dispatcher.keyed(method, path, params).await
    }

    async fn isolated_keyed(
        &self,
        method: Method,
        symbol: &str,
        listen_key: &str,
    ) -> RestResult<EmptyResponse> {
        require("symbol", symbol)?;
        require("listenKey", listen_key)?;
        let params = Params::new()
            .with("symbol", symbol)
            .with("listenKey", listen_key);
        self.dispatcher.keyed(method, ISOLATED_STREAM, params).await
    }
}
