//! Savings: flexible products, activity and customized fixed projects

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
    FlexibleProductsOptions {
        /// "SUBSCRIBABLE", "UNSUBSCRIBABLE" or "ALL"
        status: String,
        /// "ALL" or "true"
        featured: String,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    FixedProductListOptions {
        asset: String,
        status: String,
        is_sort_asc: bool,
        /// "START_TIME", "LOT_SIZE", "INTEREST_RATE" or "DURATION"
        sort_by: String,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

options! {
    CustomizedPositionOptions {
        project_id: String,
        /// "HOLDING" or "REDEEMED"
        status: String,
        recv_window: u64,
    }
}

options! {
    LendingRecordOptions {
        asset: String,
        start_time: u64,
        end_time: u64,
        current: u32,
        size: u32,
        recv_window: u64,
    }
}

/// Savings endpoints
#[derive(Debug, Clone, Copy)]
pub struct SavingsEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> SavingsEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// Flexible product list
    #[instrument(skip(self, options))]
    pub async fn flexible_products(&self, options: &FlexibleProductsOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/lending/daily/product/list", options)
            .await
    }

    /// Remaining purchase quota of a flexible product
    #[instrument(skip(self, options))]
    pub async fn flexible_user_left_quota(
        &self,
        product_id: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("productId", product_id)?;
        let params = Params::new()
            .with("productId", product_id)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/lending/daily/userLeftQuota", params)
            .await
    }

    /// Purchase a flexible product
    #[instrument(skip(self, options))]
    pub async fn purchase_flexible_product(
        &self,
        product_id: &str,
        amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("productId", product_id)?;
        let params = Params::new()
            .with("productId", product_id)
            .with("amount", amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/lending/daily/purchase", params)
            .await
    }

    /// Remaining redemption quota of a flexible product
    ///
    /// # Arguments
    /// * `redeem_type` - "FAST" or "NORMAL"
    #[instrument(skip(self, options))]
    pub async fn flexible_user_redemption_quota(
        &self,
        product_id: &str,
        redeem_type: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("productId", product_id)?;
        require("type", redeem_type)?;
        let params = Params::new()
            .with("productId", product_id)
            .with("type", redeem_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/lending/daily/userRedemptionQuota", params)
            .await
    }

    /// Redeem a flexible product
    #[instrument(skip(self, options))]
    pub async fn flexible_redeem(
        &self,
        product_id: &str,
        amount: Decimal,
        redeem_type: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("productId", product_id)?;
        require("type", redeem_type)?;
        let params = Params::new()
            .with("productId", product_id)
            .with("amount", amount.to_string())
            .with("type", redeem_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/lending/daily/redeem", params)
            .await
    }

    /// Flexible product position of an asset
    #[instrument(skip(self, options))]
    pub async fn flexible_product_position(
        &self,
        asset: &str,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new().with("asset", asset).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/lending/daily/token/position", params)
            .await
    }

    /// Fixed and activity project list
    ///
    /// # Arguments
    /// * `project_type` - "ACTIVITY" or "CUSTOMIZED_FIXED"
    #[instrument(skip(self, options))]
    pub async fn product_list(
        &self,
        project_type: &str,
        options: &FixedProductListOptions,
    ) -> RestResult<Value> {
        require("type", project_type)?;
        let params = Params::new()
            .with("type", project_type)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/lending/project/list", params)
            .await
    }

    /// Purchase lots of a customized fixed project
    #[instrument(skip(self, options))]
    pub async fn purchase_customized_project(
        &self,
        project_id: &str,
        lot: u64,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("projectId", project_id)?;
        let params = Params::new()
            .with("projectId", project_id)
            .with("lot", lot)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/lending/customizedFixed/purchase", params)
            .await
    }

    /// Fixed and activity project positions of an asset
    #[instrument(skip(self, options))]
    pub async fn customized_position(
        &self,
        asset: &str,
        options: &CustomizedPositionOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new().with("asset", asset).merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/lending/project/position/list", params)
            .await
    }

    /// Lending account summary
    #[instrument(skip(self, options))]
    pub async fn account(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/lending/union/account", options)
            .await
    }

    /// Purchase records
    ///
    /// # Arguments
    /// * `lending_type` - "DAILY", "ACTIVITY" or "CUSTOMIZED_FIXED"
    #[instrument(skip(self, options))]
    pub async fn purchase_record(
        &self,
        lending_type: &str,
        options: &LendingRecordOptions,
    ) -> RestResult<Value> {
        self.union_record("/sapi/v1/lending/union/purchaseRecord", lending_type, options)
            .await
    }

    /// Redemption records
    #[instrument(skip(self, options))]
    pub async fn redemption_record(
        &self,
        lending_type: &str,
        options: &LendingRecordOptions,
    ) -> RestResult<Value> {
        self.union_record("/sapi/v1/lending/union/redemptionRecord", lending_type, options)
            .await
    }

    /// Interest history
    #[instrument(skip(self, options))]
    pub async fn interest_history(
        &self,
        lending_type: &str,
        options: &LendingRecordOptions,
    ) -> RestResult<Value> {
        self.union_record("/sapi/v1/lending/union/interestHistory", lending_type, options)
            .await
    }

    async fn union_record(
        &self,
        path: &str,
        lending_type: &str,
        options: &LendingRecordOptions,
    ) -> RestResult<Value> {
        require("lendingType", lending_type)?;
        let params = Params::new()
            .with("lendingType", lending_type)
            .merge_options(options)?;
        self.dispatcher.signed(Method::GET, path, params).await
    }
}

