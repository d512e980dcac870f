//! Static Price Source
//!
//! For testing and demo purposes. Returns fixed prices from a table.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::PriceSource;
use crate::error::{AssistantError, Result};

/// Price source backed by an in-memory table
#[derive(Clone, Debug)]
pub struct StaticPriceSource {
    prices: HashMap<String, Decimal>,
}

impl Default for StaticPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticPriceSource {
    /// Table with a handful of realistic prices
    pub fn new() -> Self {
        let prices = [
            ("NEAR", dec!(4.20)),
            ("USDC", dec!(1)),
            ("USDT", dec!(1)),
            ("ETH", dec!(3450)),
            ("BTC", dec!(97500)),
            ("AURORA", dec!(0.12)),
        ]
        .into_iter()
        .map(|(s, p)| (s.to_string(), p))
        .collect();

        Self { prices }
    }

    /// Empty table; every lookup fails
    pub fn empty() -> Self {
        Self { prices: HashMap::new() }
    }

    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn fetch_usd_price(&self, symbol: &str) -> Result<Decimal> {
        self.prices
            .get(&symbol.to_uppercase())
            .copied()
            .ok_or_else(|| AssistantError::PriceUnavailable(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "Static"
    }
}
