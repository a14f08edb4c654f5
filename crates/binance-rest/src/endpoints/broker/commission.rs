//! Broker commission settings and rebate records

use binance_types::FuturesType;
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::BrokerEndpoints;
use crate::endpoints::RecvWindowOptions;
use crate::error::{RestError, RestResult};
use crate::params::Params;
use crate::validation::require;

options! {
    /// Margin commissions, changed together with the spot ones
    SpotCommissionOptions {
        margin_maker_commission: Decimal,
        margin_taker_commission: Decimal,
        recv_window: u64,
    }
}

options! {
    SymbolCommissionOptions {
        symbol: String,
        recv_window: u64,
    }
}

options! {
    PairCommissionOptions {
        pair: String,
        recv_window: u64,
    }
}

options! {
    BrokerRebateOptions {
        page: u32,
        size: u32,
        recv_window: u64,
    }
}

impl<'a> BrokerEndpoints<'a> {
    /// Change spot (and optionally margin) commission of a sub-account
    #[instrument(skip(self, options))]
    pub async fn change_commission(
        &self,
        sub_account_id: &str,
        maker_commission: Decimal,
        taker_commission: Decimal,
        options: &SpotCommissionOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with("makerCommission", maker_commission.to_string())
            .with("takerCommission", taker_commission.to_string())
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::POST, "/sapi/v1/broker/subAccountApi/commission", params)
            .await
    }

    /// Adjust USD-M futures commission of a sub-account on one symbol
    ///
    /// Adjustments are in units of 0.001%.
    #[instrument(skip(self, options))]
    pub async fn change_usdm_commission(
        &self,
        sub_account_id: &str,
        symbol: &str,
        maker_adjustment: i32,
        taker_adjustment: i32,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.futures_commission(
            "/sapi/v1/broker/subAccountApi/commission/futures",
            sub_account_id,
            ("symbol", symbol),
            maker_adjustment,
            taker_adjustment,
            options,
        )
        .await
    }

    /// USD-M futures commission adjustments of a sub-account
    #[instrument(skip(self, options))]
    pub async fn usdm_commission(
        &self,
        sub_account_id: &str,
        options: &SymbolCommissionOptions,
    ) -> RestResult<Value> {
        self.with_sub_account(
            Method::GET,
            "/sapi/v1/broker/subAccountApi/commission/futures",
            sub_account_id,
            options,
        )
        .await
    }

    /// Adjust COIN-M futures commission of a sub-account on one pair
    #[instrument(skip(self, options))]
    pub async fn change_coinm_commission(
        &self,
        sub_account_id: &str,
        pair: &str,
        maker_adjustment: i32,
        taker_adjustment: i32,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        self.futures_commission(
            "/sapi/v1/broker/subAccountApi/commission/coinFutures",
            sub_account_id,
            ("pair", pair),
            maker_adjustment,
            taker_adjustment,
            options,
        )
        .await
    }

    /// COIN-M futures commission adjustments of a sub-account
    #[instrument(skip(self, options))]
    pub async fn coinm_commission(
        &self,
        sub_account_id: &str,
        options: &PairCommissionOptions,
    ) -> RestResult<Value> {
        self.with_sub_account(
            Method::GET,
            "/sapi/v1/broker/subAccountApi/commission/coinFutures",
            sub_account_id,
            options,
        )
        .await
    }

    async fn futures_commission(
        &self,
        path: &str,
        sub_account_id: &str,
        (key, market): (&'static str, &str),
        maker_adjustment: i32,
        taker_adjustment: i32,
        options: &RecvWindowOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        require(key, market)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with(key, market.to_uppercase())
            .with("makerAdjustment", maker_adjustment)
            .with("takerAdjustment", taker_adjustment)
            .merge_options(options)?;
        self.dispatcher.signed(Method::POST, path, params).await
    }

    /// Spot commission rebates earned from a sub-account
    #[instrument(skip(self, options))]
    pub async fn spot_rebate_history(
        &self,
        sub_account_id: &str,
        start_time: u64,
        end_time: u64,
        options: &BrokerRebateOptions,
    ) -> RestResult<Value> {
        require("subAccountId", sub_account_id)?;
        check_range(start_time, end_time)?;
        let params = Params::new()
            .with("subAccountId", sub_account_id)
            .with("startTime", start_time)
            .with("endTime", end_time)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/broker/rebate/recentRecord", params)
            .await
    }

    /// Futures commission rebates
    #[instrument(skip(self, options))]
    pub async fn futures_rebate_history(
        &self,
        futures_type: FuturesType,
        start_time: u64,
        end_time: u64,
        options: &BrokerRebateOptions,
    ) -> RestResult<Value> {
        check_range(start_time, end_time)?;
        let params = Params::new()
            .with("futuresType", futures_type.as_u8())
            .with("startTime", start_time)
            .with("endTime", end_time)
            .merge_options(options)?;
        self.dispatcher
            .signed(Method::GET, "/sapi/v1/broker/rebate/futures/recentRecord", params)
            .await
    }
}

fn check_range(start_time: u64, end_time: u64) -> RestResult<()> {
    if end_time < start_time {
        return Err(RestError::InvalidParameter(format!(
            "endTime {end_time} is before startTime {start_time}"
        )));
    }
    Ok(())
}
