//! REST host definitions per product family

use std::fmt;

/// Binance product families, each served from its own REST host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductFamily {
    /// Spot, margin, wallet, savings, sub-account and broker APIs (default)
    #[default]
    Spot,
    /// USD-margined futures (`/fapi`)
    UsdMFutures,
    /// Coin-margined futures (`/dapi`)
    CoinMFutures,
}

impl ProductFamily {
    /// All families, in declaration order
    pub const ALL: [ProductFamily; 3] = [Self::Spot, Self::UsdMFutures, Self::CoinMFutures];

    /// Production REST host for this family
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Spot => "https://api.binance.com",
            Self::UsdMFutures => "https://fapi.binance.com",
            Self::CoinMFutures => "https://dapi.binance.com",
        }
    }

    /// Public testnet REST host for this family
    pub fn testnet_base_url(&self) -> &'static str {
        match self {
            Self::Spot => "https://testnet.binance.vision",
            Self::UsdMFutures => "https://testnet.binancefuture.com",
            Self::CoinMFutures => "https://testnet.binancefuture.com",
        }
    }

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::UsdMFutures => "usd-m",
            Self::CoinMFutures => "coin-m",
        }
    }
}

impl fmt::Display for ProductFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts() {
        assert_eq!(ProductFamily::Spot.default_base_url(), "https://api.binance.com");
        assert_eq!(ProductFamily::UsdMFutures.default_base_url(), "https://fapi.binance.com");
        assert_eq!(ProductFamily::CoinMFutures.default_base_url(), "https://dapi.binance.com");
    }

    #[test]
    fn test_default_family_is_spot() {
        assert_eq!(ProductFamily::default(), ProductFamily::Spot);
    }

    #[test]
    fn test_testnet_hosts_differ_from_production() {
        for family in ProductFamily::ALL {
            assert_ne!(family.default_base_url(), family.testnet_base_url());
        }
    }
}
