//! Price Oracle
//!
//! Wraps a [`PriceSource`] with a bounded timeout, a per-symbol TTL cache
//! and a fixed fallback price. [`PriceOracle::get_price`] never fails; the
//! typed failure is still available through [`PriceOracle::try_get_price`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::PriceSource;
use crate::config::PriceConfig;
use crate::error::{AssistantError, Result};
use crate::model::PriceQuote;

#[derive(Clone, Debug)]
struct CachedPrice {
    quote: PriceQuote,
    stored_at: Instant,
}

pub struct PriceOracle {
    source: Arc<dyn PriceSource>,
    fallback_price: Decimal,
    timeout: Duration,
    cache_ttl: Duration,
    // last write wins; a racing refresh just fetches twice
    cache: RwLock<HashMap<String, CachedPrice>>,
}

impl PriceOracle {
    /// Fails only on invalid configuration (non-positive fallback, zero timeout)
    pub fn new(source: Arc<dyn PriceSource>, config: &PriceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            fallback_price: config.fallback_price,
            timeout: config.timeout,
            cache_ttl: config.cache_ttl,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_configured()
    }

    pub const fn fallback_price(&self) -> Decimal {
        self.fallback_price
    }

    /// The quote returned whenever a live lookup fails
    pub fn fallback_quote(&self, symbol: &str) -> PriceQuote {
        PriceQuote::validated(symbol, self.fallback_price, false)
    }

    /// Live (or cached live) price, or the reason there isn't one
    pub async fn try_get_price(&self, symbol: &str) -> Result<PriceQuote> {
        let symbol = symbol.to_uppercase();

        if let Some(hit) = self.cached(&symbol).await {
            tracing::debug!(symbol = %symbol, "Price cache hit");
            return Ok(hit);
        }

        let fetched = tokio::time::timeout(self.timeout, self.source.fetch_usd_price(&symbol))
            .await
            .map_err(|_| AssistantError::Timeout {
                symbol: symbol.clone(),
                timeout: self.timeout,
            })??;

        let quote = PriceQuote::new(&symbol, fetched, true).ok_or_else(|| {
            AssistantError::NonPositivePrice { symbol: symbol.clone(), price: fetched }
        })?;

        if !self.cache_ttl.is_zero() {
            self.cache.write().await.insert(
                symbol,
                CachedPrice { quote: quote.clone(), stored_at: Instant::now() },
            );
        }

        Ok(quote)
    }

    /// Always a positive price: live when possible, the fallback otherwise
    pub async fn get_price(&self, symbol: &str) -> PriceQuote {
        match self.try_get_price(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(
                    symbol = %symbol,
                    source = self.source.name(),
                    fallback = %self.fallback_price,
                    "Price lookup failed, using fallback: {}", e
                );
                self.fallback_quote(symbol)
            }
        }
    }

    async fn cached(&self, symbol: &str) -> Option<PriceQuote> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let cache = self.cache.read().await;
        cache
            .get(symbol)
            .filter(|c| c.stored_at.elapsed() < self.cache_ttl)
            .map(|c| c.quote.clone())
    }
}
