//! Error Types for the Swap Assistant

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Price source not configured: {0}")]
    PriceSourceNotConfigured(String),

    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    #[error("Price source returned HTTP {status} for {symbol}")]
    PriceHttpStatus { symbol: String, status: u16 },

    #[error("Malformed price response for {symbol}: {reason}")]
    MalformedPrice { symbol: String, reason: String },

    #[error("Non-positive price {price} for {symbol}")]
    NonPositivePrice {
        symbol: String,
        price: rust_decimal::Decimal,
    },

    #[error("Price lookup for {symbol} timed out after {timeout:?}")]
    Timeout { symbol: String, timeout: Duration },

    #[error("No answer: {0}")]
    NoAnswer(String),

    #[error("Collaborator error: {0}")]
    Collaborator(#[from] assistant_core::CoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
