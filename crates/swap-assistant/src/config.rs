//! Configuration
//!
//! Explicit configuration structs handed to each component's constructor.
//! Environment variables are only read through [`AssistantConfig::from_env`]
//! (or [`AssistantConfig::from_lookup`] with a custom lookup in tests).

use std::str::FromStr;
use std::time::Duration;

use assistant_core::GenerationOptions;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AssistantError, Result};
use crate::intent::ClassifierMode;

/// Fallback NEAR price used when the live source is unavailable
pub const DEFAULT_FALLBACK_PRICE: Decimal = dec!(1.75);

pub const DEFAULT_PRICE_API_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

pub const DEFAULT_DEX_URL: &str = "https://app.rhea.finance";

/// Price oracle settings
#[derive(Clone, Debug)]
pub struct PriceConfig {
    /// Quote endpoint (CoinMarketCap-compatible)
    pub api_url: String,

    /// API key; without one every lookup uses the fallback
    pub api_key: Option<String>,

    /// Fiat ticker prices are converted to
    pub convert: String,

    /// Upper bound on one lookup
    pub timeout: Duration,

    /// Price returned when the lookup fails; must be positive
    pub fallback_price: Decimal,

    /// How long a live price is reused; zero disables caching
    pub cache_ttl: Duration,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PRICE_API_URL.into(),
            api_key: None,
            convert: "USD".into(),
            timeout: Duration::from_secs(10),
            fallback_price: DEFAULT_FALLBACK_PRICE,
            cache_ttl: Duration::from_secs(60),
        }
    }
}

impl PriceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fallback_price <= Decimal::ZERO {
            return Err(AssistantError::Config(format!(
                "fallback price must be positive, got {}",
                self.fallback_price
            )));
        }
        if self.timeout.is_zero() {
            return Err(AssistantError::Config("price timeout must be non-zero".into()));
        }
        Ok(())
    }
}

/// External DEX the quote links to
#[derive(Clone, Debug)]
pub struct DexConfig {
    pub name: String,
    pub url: String,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            name: "Rhea Finance".into(),
            url: DEFAULT_DEX_URL.into(),
        }
    }
}

/// Knowledge responder settings
#[derive(Clone, Debug)]
pub struct KnowledgeConfig {
    /// Passages requested from document search
    pub top_k: usize,

    /// Context handed to the LLM is cut at this many characters
    pub max_context_chars: usize,

    /// Excerpt length in docs-only mode (no LLM configured)
    pub excerpt_chars: usize,

    /// LLM generation options
    pub generation: GenerationOptions,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_context_chars: 4000,
            excerpt_chars: 800,
            generation: GenerationOptions::default(),
        }
    }
}

/// Complete assistant configuration
#[derive(Clone, Debug, Default)]
pub struct AssistantConfig {
    pub price: PriceConfig,
    pub dex: DexConfig,
    pub classifier: ClassifierMode,
    pub knowledge: KnowledgeConfig,
}

impl AssistantConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("CMC_API_URL") {
            config.price.api_url = url;
        }
        config.price.api_key = get("CMC_API_KEY");
        if let Some(secs) = get("PRICE_TIMEOUT_SECS") {
            config.price.timeout = Duration::from_secs(parse_value("PRICE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(price) = get("FALLBACK_PRICE") {
            config.price.fallback_price = parse_value("FALLBACK_PRICE", &price)?;
        }
        if let Some(secs) = get("PRICE_CACHE_TTL_SECS") {
            config.price.cache_ttl = Duration::from_secs(parse_value("PRICE_CACHE_TTL_SECS", &secs)?);
        }

        if let Some(url) = get("DEX_URL") {
            config.dex.url = url;
        }
        if let Some(name) = get("DEX_NAME") {
            config.dex.name = name;
        }

        if let Some(mode) = get("CLASSIFIER_MODE") {
            config.classifier = mode.parse().map_err(AssistantError::Config)?;
        }

        if let Some(k) = get("RAG_TOP_K") {
            config.knowledge.top_k = parse_value("RAG_TOP_K", &k)?;
        }
        if let Some(model) = get("LLM_MODEL") {
            config.knowledge.generation.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.price.validate()?;
        if self.knowledge.top_k == 0 {
            return Err(AssistantError::Config("RAG_TOP_K must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AssistantError::Config(format!("invalid value for {key}: '{raw}'")))
}
