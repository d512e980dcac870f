//! CoinMarketCap Price Source
//!
//! One GET to `quotes/latest` per lookup; the price is read from
//! `data.<SYMBOL>.quote.<CONVERT>.price`.

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;

use super::PriceSource;
use crate::config::PriceConfig;
use crate::error::{AssistantError, Result};

/// Fractional digits kept from the float the API returns
const PRICE_SCALE: u32 = 10;

pub struct CoinMarketCapSource {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    convert: String,
}

impl CoinMarketCapSource {
    pub fn new(config: &PriceConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            convert: config.convert.to_uppercase(),
        }
    }

    /// Pull the price out of a `quotes/latest` body
    ///
    /// v1 keys `data` by symbol; v2 maps each symbol to an array of matches,
    /// in which case the first match wins.
    fn extract_price(&self, symbol: &str, body: &Value) -> Result<Decimal> {
        let malformed = |reason: &str| AssistantError::MalformedPrice {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        };

        let entry = body
            .get("data")
            .and_then(|d| d.get(symbol))
            .ok_or_else(|| malformed("missing data entry"))?;
        let entry = match entry {
            Value::Array(items) => items.first().ok_or_else(|| malformed("empty data entry"))?,
            other => other,
        };

        let price = entry
            .get("quote")
            .and_then(|q| q.get(&self.convert))
            .and_then(|c| c.get("price"))
            .and_then(Value::as_f64)
            .ok_or_else(|| malformed("missing numeric price"))?;

        Decimal::from_f64_retain(price)
            .map(|d| d.round_dp(PRICE_SCALE))
            .ok_or_else(|| malformed("price is not a finite number"))
    }
}

#[async_trait]
impl PriceSource for CoinMarketCapSource {
    async fn fetch_usd_price(&self, symbol: &str) -> Result<Decimal> {
        let api_key = self.api_key
            .as_deref()
            .ok_or_else(|| AssistantError::PriceSourceNotConfigured("CMC_API_KEY is not set".into()))?;

        let response = self.http
            .get(&self.api_url)
            .header("X-CMC_PRO_API_KEY", api_key)
            .header("Accept", "application/json")
            .query(&[("symbol", symbol), ("convert", self.convert.as_str())])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AssistantError::PriceHttpStatus {
                symbol: symbol.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        self.extract_price(symbol, &body)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        "CoinMarketCap"
    }
}
