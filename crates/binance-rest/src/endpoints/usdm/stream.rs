//! USD-M user data stream listen key
//!
//! One listen key per account; keepalive and close need no key argument.

use reqwest::Method;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::params::Params;
use crate::types::{EmptyResponse, ListenKey};

const LISTEN_KEY: &str = "/fapi/v1/listenKey";

/// USD-M user data stream endpoints
#[derive(Debug, Clone, Copy)]
pub struct UsdMUserStreamEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> UsdMUserStreamEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Start a user data stream, or return the active key
    #[instrument(skip(self))]
    pub async fn start(&self) -> RestResult<ListenKey> {
        self.dispatcher
            .keyed(Method::POST, LISTEN_KEY, Params::new())
            .await
    }

    /// Extend the listen key by 60 minutes
    #[instrument(skip(self))]
    pub async fn keepalive(&self) -> RestResult<EmptyResponse> {
        self.dispatcher
            .keyed(Method::PUT, LISTEN_KEY, Params::new())
            .await
    }

    /// Close the user data stream
    #[instrument(skip(self))]
    pub async fn close(&self) -> RestResult<EmptyResponse> {
        self.dispatcher
            .keyed(Method::DELETE, LISTEN_KEY, Params::new())
            .await
    }
}
