//! Staking products (locked staking, locked DeFi staking, flexible DeFi staking)

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
    StakingProductListOptions {
        asset: String,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    StakingPurchaseOptions {
        /// `"true"` or `"false"`
        renewable: String,
        recv_window: u64,
    }
}

options! {
    StakingRedeemOptions {
        /// Required for locked products
        position_id: String,
        /// Required for flexible DeFi staking
        amount: Decimal,
        recv_window: u64,
    }
}

options! {
    StakingPositionOptions {
        product_id: String,
        asset: String,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    StakingHistoryOptions {
        asset: String,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

/// Staking endpoints
///
/// `product` is "STAKING", "F_DEFI" or "L_DEFI".
#[derive(Debug, Clone, Copy)]
pub struct StakingEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> StakingEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Available staking products
    #[instrument(skip(self, options))]
    pub async fn product_list(
        &self,
        product: &str,
        options: &StakingProductListOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        let params = Params::new().with("product", product).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/staking/productList", params)
            .await
    }

    /// Purchase a staking product
    #[instrument(skip(self, options))]
    pub async fn purchase_product(
        &self,
        product: &str,
        product_id: &str,
        amount: Decimal,
        options: &StakingPurchaseOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        require("productId", product_id)?;
        let params = Params::new()
            .with("product", product)
            .with("productId", product_id)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/staking/purchase", params)
            .await
    }

    /// Redeem a staking product
    #[instrument(skip(self, options))]
    pub async fn redeem_product(
        &self,
        product: &str,
        product_id: &str,
        options: &StakingRedeemOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        require("productId", product_id)?;
        let params = Params::new()
            .with("product", product)
            .with("productId", product_id)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/staking/redeem", params)
            .await
    }

    /// Current staking positions
    #[instrument(skip(self, options))]
    pub async fn product_position(
        &self,
        product: &str,
        options: &StakingPositionOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        let params = Params::new().with("product", product).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/staking/position", params)
            .await
    }

    /// Staking history
    ///
    /// # Arguments
    /// * `txn_type` - "SUBSCRIPTION", "REDEMPTION" or "INTEREST"
    #[instrument(skip(self, options))]
    pub async fn history(
        &self,
        product: &str,
        txn_type: &str,
        options: &StakingHistoryOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        require("txnType", txn_type)?;
        let params = Params::new()
            .with("product", product)
            .with("txnType", txn_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/staking/stakingRecord", params)
            .await
    }

    /// Turn auto-renewal on or off for a locked position
    #[instrument(skip(self, options))]
    pub async fn set_auto_staking(
        &self,
        product: &str,
        position_id: &str,
        renewable: bool,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        require("positionId", position_id)?;
        let params = Params::new()
            .with("product", product)
            .with("positionId", position_id)
            .with("renewable", renewable.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/staking/setAutoStaking", params)
            .await
    }

    /// Remaining personal quota for a product
    #[instrument(skip(self, options))]
    pub async fn product_quota(
        &self,
        product: &str,
        product_id: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("product", product)?;
        require("productId", product_id)?;
        let params = Params::new()
            .with("product", product)
            .with("productId", product_id)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/staking/personalLeftQuota", params)
            .await
    }
}
