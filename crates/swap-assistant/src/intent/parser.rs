//! Swap Intent Parser
//!
//! Recognizes "swap AMOUNT FROM for|to TO" anywhere in free text.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::model::TradeIntent;

/// "swap", amount, source token, "for"/"to", destination token (case-insensitive)
static SWAP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bswap\s+(\d+(?:\.\d+)?)\s+(\w+)\s+(?:for|to)\s+(\w+)")
        .expect("swap pattern is a valid regex")
});

/// Parse a swap request, or `None` when the text isn't one
///
/// Amounts that are zero or don't fit a `Decimal` count as no match. That
/// includes positive literals with more than 28 fractional digits, which
/// `Decimal` rounds to zero.
pub fn parse(text: &str) -> Option<TradeIntent> {
    let caps = SWAP_PATTERN.captures(text)?;

    let amount = Decimal::from_str(&caps[1]).ok()?;
    if amount <= Decimal::ZERO {
        return None;
    }

    Some(TradeIntent::new(amount, &caps[2], &caps[3]))
}
