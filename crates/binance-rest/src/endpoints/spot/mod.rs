//! Spot host (`api.binance.com`) endpoint groups

pub mod blvt;
pub mod bswap;
pub mod convert;
pub mod history;
pub mod margin;
pub mod market;
pub mod savings;
pub mod staking;
pub mod stream;
pub mod sub_account;
pub mod wallet;

pub use blvt::BlvtEndpoints;
pub use bswap::BswapEndpoints;
pub use convert::ConvertEndpoints;
pub use history::HistoryEndpoints;
pub use margin::MarginEndpoints;
pub use market::MarketEndpoints;
pub use savings::SavingsEndpoints;
pub use staking::StakingEndpoints;
pub use stream::UserStreamEndpoints;
pub use sub_account::SubAccountEndpoints;
pub use wallet::WalletEndpoints;
