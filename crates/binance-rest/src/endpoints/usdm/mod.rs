//! USD-M futures (`fapi.binance.com`) endpoint groups

pub mod market;
pub mod portfolio_margin;
pub mod stream;
pub mod trade;

pub use market::UsdMMarketEndpoints;
pub use portfolio_margin::UsdMPortfolioMarginEndpoints;
pub use stream::UsdMUserStreamEndpoints;
pub use trade::UsdMTradeEndpoints;
