//! Domain Models
//!
//! Per-request value types for swap quoting. Uses `rust_decimal` for all
//! monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Tickers treated as worth exactly one US dollar
pub const USD_PEGGED: &[&str] = &["USD", "USDC", "USDT", "DAI"];

/// Whether a ticker is one of the [`USD_PEGGED`] stablecoins
pub fn is_usd_pegged(symbol: &str) -> bool {
    USD_PEGGED.iter().any(|s| s.eq_ignore_ascii_case(symbol))
}

/// Which way a query is routed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Looks like a swap/transfer request
    Trade,
    /// Everything else
    Knowledge,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trade => write!(f, "TRADE"),
            Self::Knowledge => write!(f, "KNOWLEDGE"),
        }
    }
}

/// A parsed "swap AMOUNT FROM for TO" request
///
/// Only the parser creates these; `amount` is always positive and both
/// symbols are non-empty and upper-case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradeIntent {
    amount: Decimal,
    from_symbol: String,
    to_symbol: String,
}

impl TradeIntent {
    pub(crate) fn new(amount: Decimal, from_symbol: &str, to_symbol: &str) -> Self {
        debug_assert!(amount > Decimal::ZERO);
        Self {
            amount,
            from_symbol: from_symbol.to_uppercase(),
            to_symbol: to_symbol.to_uppercase(),
        }
    }

    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn from_symbol(&self) -> &str {
        &self.from_symbol
    }

    pub fn to_symbol(&self) -> &str {
        &self.to_symbol
    }

    /// The asset whose USD price drives the quote
    ///
    /// The destination, unless the destination is USD-pegged and the source
    /// is not (selling a volatile asset for dollars), in which case the source.
    pub fn priced_symbol(&self) -> &str {
        if is_usd_pegged(&self.to_symbol) && !is_usd_pegged(&self.from_symbol) {
            &self.from_symbol
        } else {
            &self.to_symbol
        }
    }
}

/// A USD price for one asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    symbol: String,
    usd_price: Decimal,
    is_live: bool,
    fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    /// `None` unless `usd_price` is strictly positive
    pub fn new(symbol: impl Into<String>, usd_price: Decimal, is_live: bool) -> Option<Self> {
        (usd_price > Decimal::ZERO).then(|| Self::validated(symbol, usd_price, is_live))
    }

    /// Caller guarantees `usd_price > 0`
    pub(crate) fn validated(symbol: impl Into<String>, usd_price: Decimal, is_live: bool) -> Self {
        debug_assert!(usd_price > Decimal::ZERO);
        Self {
            symbol: symbol.into().to_uppercase(),
            usd_price,
            is_live,
            fetched_at: Utc::now(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn usd_price(&self) -> Decimal {
        self.usd_price
    }

    /// True when the value came from the external price API
    pub const fn is_live(&self) -> bool {
        self.is_live
    }

    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Whether the quote buys or sells the priced asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteDirection {
    /// Destination is the priced asset: `amount / price`
    Buy,
    /// Source is the priced asset: `amount * price`
    Sell,
}

/// Estimated output of a swap
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    /// The originating request
    pub intent: TradeIntent,

    /// Full-precision estimate in units of `intent.to_symbol()`
    pub output_amount: Decimal,

    /// USD price used for the estimate
    pub price_used: Decimal,

    /// Asset the price applies to
    pub priced_symbol: String,

    /// Whether the price came from the live API
    pub price_is_live: bool,

    pub direction: QuoteDirection,
}

impl SwapQuote {
    /// Output amount rounded for display
    pub fn display_output(&self) -> Decimal {
        self.output_amount.round_dp(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_pegged_is_case_insensitive() {
        assert!(is_usd_pegged("usdc"));
        assert!(is_usd_pegged("DAI"));
        assert!(!is_usd_pegged("NEAR"));
    }

    #[test]
    fn test_priced_symbol_prefers_destination() {
        let buy = TradeIntent::new(dec!(1), "usdc", "near");
        assert_eq!(buy.priced_symbol(), "NEAR");

        let sell = TradeIntent::new(dec!(1), "near", "usdt");
        assert_eq!(sell.priced_symbol(), "NEAR");

        let stable = TradeIntent::new(dec!(1), "usdc", "usdt");
        assert_eq!(stable.priced_symbol(), "USDT");
    }

    #[test]
    fn test_price_quote_rejects_non_positive() {
        assert!(PriceQuote::new("NEAR", Decimal::ZERO, true).is_none());
        assert!(PriceQuote::new("NEAR", dec!(-1), true).is_none());

        let quote = PriceQuote::new("near", dec!(4.2), false).unwrap();
        assert_eq!(quote.symbol(), "NEAR");
        assert!(!quote.is_live());
    }
}
