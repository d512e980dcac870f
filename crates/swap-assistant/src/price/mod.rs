//! Price Sources
//!
//! Abstractions and implementations for USD price lookups, plus the
//! [`PriceOracle`] that adds a timeout, a short-lived cache and a fallback.

mod coinmarketcap;
mod fixed;
mod oracle;

pub use coinmarketcap::CoinMarketCapSource;
pub use fixed::StaticPriceSource;
pub use oracle::PriceOracle;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// Price source trait (Strategy pattern)
///
/// Implement this for each quote API: CoinMarketCap, CoinGecko, a DEX pool.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current USD price for an upper-case ticker
    async fn fetch_usd_price(&self, symbol: &str) -> Result<Decimal>;

    /// Whether the source has what it needs (API key etc.) to make requests
    fn is_configured(&self) -> bool {
        true
    }

    /// Source name
    fn name(&self) -> &str;
}
