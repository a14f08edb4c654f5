//! Main REST client implementation

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use binance_auth::Credentials;
use binance_types::ProductFamily;
use reqwest::Client;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::endpoints::broker::BrokerEndpoints;
use crate::endpoints::coinm::{
    CoinMMarketEndpoints, CoinMPortfolioMarginEndpoints, CoinMTradeEndpoints,
    CoinMUserStreamEndpoints,
};
use crate::endpoints::spot::{
    BlvtEndpoints, BswapEndpoints, ConvertEndpoints, HistoryEndpoints, MarginEndpoints,
    MarketEndpoints, SavingsEndpoints, StakingEndpoints, SubAccountEndpoints,
    UserStreamEndpoints, WalletEndpoints,
};
use crate::endpoints::usdm::{
    UsdMMarketEndpoints, UsdMPortfolioMarginEndpoints, UsdMTradeEndpoints,
    UsdMUserStreamEndpoints,
};
use crate::error::{RestError, RestResult};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of the `timestamp` parameter for signed requests
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// REST hosts, one per product family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    /// Spot, margin, wallet and broker host
    pub spot: String,
    /// USD-M futures host
    pub usd_m_futures: String,
    /// COIN-M futures host
    pub coin_m_futures: String,
}

impl BaseUrls {
    /// Public testnet hosts
    pub fn testnet() -> Self {
        Self::from_fn(ProductFamily::testnet_base_url)
    }

    /// Point every family at the same host (useful against a mock server)
    pub fn uniform(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            spot: url.clone(),
            usd_m_futures: url.clone(),
            coin_m_futures: url,
        }
    }

    /// Host for a family
    pub fn get(&self, family: ProductFamily) -> &str {
        match family {
            ProductFamily::Spot => &self.spot,
            ProductFamily::UsdMFutures => &self.usd_m_futures,
            ProductFamily::CoinMFutures => &self.coin_m_futures,
        }
    }

    /// Replace the host for a family
    pub fn set(&mut self, family: ProductFamily, url: impl Into<String>) {
        let slot = match family {
            ProductFamily::Spot => &mut self.spot,
            ProductFamily::UsdMFutures => &mut self.usd_m_futures,
            ProductFamily::CoinMFutures => &mut self.coin_m_futures,
        };
        *slot = url.into();
    }

    fn from_fn(host: fn(&ProductFamily) -> &'static str) -> Self {
        Self {
            spot: host(&ProductFamily::Spot).to_string(),
            usd_m_futures: host(&ProductFamily::UsdMFutures).to_string(),
            coin_m_futures: host(&ProductFamily::CoinMFutures).to_string(),
        }
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self::from_fn(ProductFamily::default_base_url)
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional, required for signed endpoints)
    pub credentials: Option<Credentials>,
    /// REST hosts per product family
    pub base_urls: BaseUrls,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// `recvWindow` added to signed requests that do not set one
    pub recv_window: Option<u64>,
    /// Timestamp source for signed requests
    pub clock: Arc<dyn Clock>,
}

impl ClientConfig {
    /// Set default credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the REST hosts
    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the `recvWindow` added to signed requests
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window = Some(recv_window_ms);
        self
    }

    /// Set the timestamp source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(concat!("binance-rest/", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_urls: BaseUrls::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            recv_window: None,
            clock: Arc::new(SystemClock),
        }
    }
}

/// Binance REST API client
///
/// One client serves all three product families; each endpoint group picks
/// its host from [`ClientConfig::base_urls`].
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BinanceRestClient::new()?;
///     let time = client.market().time().await?;
///     println!("server time {}", time.server_time);
///
///     // With authentication for signed endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BinanceRestClient::with_credentials(creds)?;
///     let account = auth_client.wallet().account_status(&Default::default()).await?;
///     println!("{account}");
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    http_client: Client,
    config: Arc<ClientConfig>,
}

impl BinanceRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RestError::Config(e.to_string()))?;

        info!(
            spot = %config.base_urls.spot,
            authenticated = config.credentials.is_some(),
            "Created Binance REST client"
        );

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    /// Clone this client with different credentials
    ///
    /// The HTTP connection pool is shared with `self`.
    pub fn for_credentials(&self, credentials: Credentials) -> Self {
        let mut config = (*self.config).clone();
        config.credentials = Some(credentials);
        Self {
            http_client: self.http_client.clone(),
            config: Arc::new(config),
        }
    }

    /// Check if the client has credentials for signed endpoints
    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Low-level dispatcher for a product family
    ///
    /// Use this to call endpoints that have no typed wrapper.
    pub fn dispatcher(&self, family: ProductFamily) -> Dispatcher<'_> {
        Dispatcher::new(&self.http_client, &self.config, family)
    }

    // ========================================================================
    // Spot
    // ========================================================================

    /// Spot market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Spot, margin and isolated margin listen keys
    pub fn user_stream(&self) -> UserStreamEndpoints<'_> {
        UserStreamEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Wallet endpoints (deposits, withdrawals, dust, asset details)
    pub fn wallet(&self) -> WalletEndpoints<'_> {
        WalletEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Cross and isolated margin endpoints
    pub fn margin(&self) -> MarginEndpoints<'_> {
        MarginEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Savings (flexible and fixed products)
    pub fn savings(&self) -> SavingsEndpoints<'_> {
        SavingsEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Staking products
    pub fn staking(&self) -> StakingEndpoints<'_> {
        StakingEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Sub-account management for master accounts
    pub fn sub_account(&self) -> SubAccountEndpoints<'_> {
        SubAccountEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Convert endpoints
    pub fn convert(&self) -> ConvertEndpoints<'_> {
        ConvertEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Leveraged token endpoints
    pub fn blvt(&self) -> BlvtEndpoints<'_> {
        BlvtEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Liquidity swap pools
    pub fn bswap(&self) -> BswapEndpoints<'_> {
        BswapEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Read-only history (C2C, fiat, loans, NFT, pay, rebates)
    pub fn history(&self) -> HistoryEndpoints<'_> {
        HistoryEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    /// Exchange-link broker endpoints
    pub fn broker(&self) -> BrokerEndpoints<'_> {
        BrokerEndpoints::new(self.dispatcher(ProductFamily::Spot))
    }

    // ========================================================================
    // USD-M futures
    // ========================================================================

    /// USD-M futures market data
    pub fn usdm_market(&self) -> UsdMMarketEndpoints<'_> {
        UsdMMarketEndpoints::new(self.dispatcher(ProductFamily::UsdMFutures))
    }

    /// USD-M futures trading and account endpoints
    pub fn usdm_trade(&self) -> UsdMTradeEndpoints<'_> {
        UsdMTradeEndpoints::new(self.dispatcher(ProductFamily::UsdMFutures))
    }

    /// USD-M futures listen keys
    pub fn usdm_user_stream(&self) -> UsdMUserStreamEndpoints<'_> {
        UsdMUserStreamEndpoints::new(self.dispatcher(ProductFamily::UsdMFutures))
    }

    /// USD-M portfolio margin endpoints
    pub fn usdm_portfolio_margin(&self) -> UsdMPortfolioMarginEndpoints<'_> {
        UsdMPortfolioMarginEndpoints::new(self.dispatcher(ProductFamily::UsdMFutures))
    }

    // ========================================================================
    // COIN-M futures
    // ========================================================================

    /// COIN-M futures market data
    pub fn coinm_market(&self) -> CoinMMarketEndpoints<'_> {
        CoinMMarketEndpoints::new(self.dispatcher(ProductFamily::CoinMFutures))
    }

    /// COIN-M futures trading and account endpoints
    pub fn coinm_trade(&self) -> CoinMTradeEndpoints<'_> {
        CoinMTradeEndpoints::new(self.dispatcher(ProductFamily::CoinMFutures))
    }

    /// COIN-M futures listen keys
    pub fn coinm_user_stream(&self) -> CoinMUserStreamEndpoints<'_> {
        CoinMUserStreamEndpoints::new(self.dispatcher(ProductFamily::CoinMFutures))
    }

    /// COIN-M portfolio margin endpoints
    pub fn coinm_portfolio_margin(&self) -> CoinMPortfolioMarginEndpoints<'_> {
        CoinMPortfolioMarginEndpoints::new(self.dispatcher(ProductFamily::CoinMFutures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.credentials.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.base_urls.get(ProductFamily::Spot), "https://api.binance.com");
        assert!(config.user_agent().starts_with("binance-rest/"));
    }

    #[test]
    fn test_base_urls_override() {
        let mut urls = BaseUrls::default();
        urls.set(ProductFamily::UsdMFutures, "http://localhost:1234");
        assert_eq!(urls.get(ProductFamily::UsdMFutures), "http://localhost:1234");
        assert_eq!(urls.get(ProductFamily::CoinMFutures), "https://dapi.binance.com");
    }

    #[test]
    fn test_for_credentials_keeps_config() {
        let client =
            BinanceRestClient::with_config(ClientConfig::default().with_recv_window(5000)).unwrap();
        assert!(!client.has_credentials());

        let scoped = client.for_credentials(Credentials::new("k", "s"));
        assert!(scoped.has_credentials());
        assert_eq!(scoped.config().recv_window, Some(5000));
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_system_clock_is_after_2023() {
        assert!(SystemClock.now_millis() > 1_672_531_200_000);
    }
}
