//! Quote Calculator
//!
//! Deterministic conversion of a trade intent at a given USD price.

use rust_decimal::Decimal;

use crate::model::{PriceQuote, QuoteDirection, SwapQuote, TradeIntent};

/// Estimate the output of `intent` at `price`
///
/// Buying the priced asset divides by its price, selling it multiplies.
/// A price for a symbol on neither side is applied as the destination's
/// price. Results that overflow `Decimal` saturate at `Decimal::MAX`.
pub fn compute(intent: &TradeIntent, price: &PriceQuote) -> SwapQuote {
    let direction = if price.symbol() != intent.to_symbol() && price.symbol() == intent.from_symbol() {
        QuoteDirection::Sell
    } else {
        QuoteDirection::Buy
    };

    let output_amount = match direction {
        QuoteDirection::Buy => intent.amount().checked_div(price.usd_price()),
        QuoteDirection::Sell => intent.amount().checked_mul(price.usd_price()),
    }
    .unwrap_or(Decimal::MAX);

    SwapQuote {
        intent: intent.clone(),
        output_amount,
        price_used: price.usd_price(),
        priced_symbol: price.symbol().to_string(),
        price_is_live: price.is_live(),
        direction,
    }
}
