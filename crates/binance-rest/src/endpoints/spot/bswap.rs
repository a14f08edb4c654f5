//! Binance liquidity swap pools
//!
//! Pool ids are numeric. Quantities are decimals rendered in plain notation.

use binance_types::LiquidityType;
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
    /// Restrict to one pool
    PoolOptions {
        pool_id: u64,
        recv_window: u64,
    }
}

options! {
    AddLiquidityOptions {
        /// Single or dual token deposit, SINGLE when unset
        #[serde(rename = "type")]
        liquidity_type: LiquidityType,
        recv_window: u64,
    }
}

options! {
    LiquidityOpsOptions {
        operation_id: u64,
        pool_id: u64,
        /// "ADD" or "REMOVE"
        operation: String,
        start_time: u64,
        end_time: u64,
        /// Default 3, max 100
        limit: u32,
        recv_window: u64,
    }
}

options! {
    SwapHistoryOptions {
        swap_id: u64,
        start_time: u64,
        end_time: u64,
        /// 0 pending, 1 success, 2 failed
        status: u8,
        quote_asset: String,
        base_asset: String,
        limit: u32,
        recv_window: u64,
    }
}

options! {
    /// Swap (0) or liquidity (1) rewards
    RewardOptions {
        #[serde(rename = "type")]
        reward_type: u8,
        recv_window: u64,
    }
}

options! {
    ClaimedHistoryOptions {
        pool_id: u64,
        asset_rewards: String,
        #[serde(rename = "type")]
        reward_type: u8,
        start_time: u64,
        end_time: u64,
        limit: u32,
        recv_window: u64,
    }
}

/// Liquidity swap endpoints
#[derive(Debug, Clone, Copy)]
pub struct BswapEndpoints<'a> {
    dispatcher: Dispatcher<'a>,
}

impl<'a> BswapEndpoints<'a> {
    pub fn new(dispatcher: Dispatcher<'a>) -> Self {
        Self { dispatcher }
    }

    /// All swap pools
    #[instrument(skip(self, options))]
    pub async fn pools(&self, options: &RecvWindowOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/pools", options)
            .await
    }

    /// Liquidity held in one or all pools
    #[instrument(skip(self, options))]
    pub async fn liquidity(&self, options: &PoolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/liquidity", options)
            .await
    }

    /// Add liquidity to a pool
    #[instrument(skip(self, options))]
    pub async fn add_liquidity(
        &self,
        pool_id: u64,
        asset: &str,
        quantity: Decimal,
        options: &AddLiquidityOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("poolId", pool_id)
            .with("asset", asset)
            .with("quantity", quantity.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/bswap/liquidityAdd", params)
            .await
    }

    /// Remove `share_amount` of pool shares
    #[instrument(skip(self, options))]
    pub async fn remove_liquidity(
        &self,
        pool_id: u64,
        liquidity_type: LiquidityType,
        asset: &str,
        share_amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("asset", asset)?;
        let params = Params::new()
            .with("poolId", pool_id)
            .with("type", liquidity_type.as_str())
            .with("asset", asset)
            .with("shareAmount", share_amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/bswap/liquidityRemove", params)
            .await
    }

    /// Add/remove operation records
    #[instrument(skip(self, options))]
    pub async fn liquidity_ops(&self, options: &LiquidityOpsOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/liquidityOps", options)
            .await
    }

    /// Indicative quote for selling `quote_qty` of `quote_asset`
    #[instrument(skip(self, options))]
    pub async fn request_quote(
        &self,
        quote_asset: &str,
        base_asset: &str,
        quote_qty: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = swap_params(quote_asset, base_asset, quote_qty)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/bswap/quote", params)
            .await
    }

    /// Swap `quote_qty` of `quote_asset` into `base_asset`
    #[instrument(skip(self, options))]
    pub async fn swap(
        &self,
        quote_asset: &str,
        base_asset: &str,
        quote_qty: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        let params = swap_params(quote_asset, base_asset, quote_qty)?.merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/bswap/swap", params)
            .await
    }

    /// Past swaps
    #[instrument(skip(self, options))]
    pub async fn swap_history(&self, options: &SwapHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/swap", options)
            .await
    }

    /// Pool configuration and limits
    #[instrument(skip(self, options))]
    pub async fn pool_config(&self, options: &PoolOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/poolConfigure", options)
            .await
    }

    /// Shares and fees an add would produce
    #[instrument(skip(self, options))]
    pub async fn add_liquidity_preview(
        &self,
        pool_id: u64,
        liquidity_type: LiquidityType,
        quote_asset: &str,
        quote_qty: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("quoteAsset", quote_asset)?;
        let params = Params::new()
            .with("poolId", pool_id)
            .with("type", liquidity_type.as_str())
            .with("quoteAsset", quote_asset)
            .with("quoteQty", quote_qty.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/bswap/addLiquidityPreview", params)
            .await
    }

    /// Assets a removal would return
    #[instrument(skip(self, options))]
    pub async fn remove_liquidity_preview(
        &self,
        pool_id: u64,
        liquidity_type: LiquidityType,
        quote_asset: &str,
        share_amount: Decimal,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("quoteAsset", quote_asset)?;
        let params = Params::new()
            .with("poolId", pool_id)
            .with("type", liquidity_type.as_str())
            .with("quoteAsset", quote_asset)
            .with("shareAmount", share_amount.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/bswap/removeLiquidityPreview", params)
            .await
    }

    /// Rewards not yet claimed
    #[instrument(skip(self, options))]
    pub async fn unclaimed_rewards(&self, options: &RewardOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/unclaimedRewards", options)
            .await
    }

    /// Claim pending rewards
    #[instrument(skip(self, options))]
    pub async fn claim_rewards(&self, options: &RewardOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::POST, "/sapi/v1/bswap/claimRewards", options)
            .await
    }

    #[instrument(skip(self, options))]
    pub async fn claimed_history(&self, options: &ClaimedHistoryOptions) -> RestResult<Value> {
        self.dispatcher
            .signed_options(Method::GET, "/sapi/v1/bswap/claimedHistory", options)
            .await
    }
}

fn swap_params(quote_asset: &str, base_asset: &str, quote_qty: Decimal) -> RestResult<Params> {
    require("quoteAsset", quote_asset)?;
    require("baseAsset", base_asset)?;
    Ok(Params::new()
        .with("quoteAsset", quote_asset)
        .with("baseAsset", base_asset)
        .with("quoteQty", quote_qty.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{build_query_string, sanitize};
    use rust_decimal_macros::dec;

    #[test]
    fn test_swap_params_order() {
        let params = swap_params("USDT", "BUSD", dec!(12.5)).unwrap();
        assert_eq!(
            build_query_string(&params),
            "quoteAsset=USDT&baseAsset=BUSD&quoteQty=12.5"
        );
    }

    #[test]
    fn test_swap_params_require_assets() {
        assert!(swap_params("", "BUSD", dec!(1)).is_err());
        assert!(swap_params("USDT", " ", dec!(1)).is_err());
    }

    #[test]
    fn test_reward_type_renamed() {
        let options = RewardOptions::builder().reward_type(1u8).build();
        let params = Params::new().merge_options(&options).unwrap();
        assert_eq!(build_query_string(&sanitize(&params)), "type=1");
    }
}
