//! COIN-M futures (`dapi.binance.com`) endpoint groups

pub mod market;
pub mod portfolio_margin;
pub mod stream;
pub mod trade;

pub use market::CoinMMarketEndpoints;
pub use portfolio_margin::CoinMPortfolioMarginEndpoints;
pub use stream::CoinMUserStreamEndpoints;
pub use trade::CoinMTradeEndpoints;
