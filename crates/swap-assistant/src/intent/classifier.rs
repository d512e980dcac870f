//! Intent Classifier
//!
//! Keyword heuristic deciding whether a query is a trade request. A query
//! using "swap" in a non-trade sense still routes to `Trade`; that false
//! positive is accepted, the parser then answers with format help.

use serde::Deserialize;

use crate::model::QueryKind;

/// Any of these in the lower-cased query means `Trade` in keyword mode
pub const TRADE_KEYWORDS: &[&str] = &["swap", "exchange", "send", "transfer", "bridge"];

/// Source-side keywords the strict mode looks for
pub const STRICT_SOURCE_KEYWORDS: &[&str] = &["usdc", "usdt", "usd", "dai"];

/// Destination keyword the strict mode requires
pub const STRICT_DESTINATION_KEYWORD: &str = "near";

/// How aggressively queries are routed to the trade path
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Any trade keyword
    #[default]
    Keywords,
    /// "swap" plus a USD-pegged source keyword plus "near"
    Strict,
}

impl std::str::FromStr for ClassifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keywords" | "keyword" => Ok(Self::Keywords),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown classifier mode '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IntentClassifier {
    mode: ClassifierMode,
}

impl IntentClassifier {
    pub const fn new(mode: ClassifierMode) -> Self {
        Self { mode }
    }

    pub const fn mode(&self) -> ClassifierMode {
        self.mode
    }

    /// Total: every string maps to exactly one kind
    pub fn classify(&self, text: &str) -> QueryKind {
        let lower = text.to_lowercase();
        let is_trade = match self.mode {
            ClassifierMode::Keywords => TRADE_KEYWORDS.iter().any(|k| lower.contains(k)),
            ClassifierMode::Strict => {
                lower.contains("swap")
                    && STRICT_SOURCE_KEYWORDS.iter().any(|k| lower.contains(k))
                    && lower.contains(STRICT_DESTINATION_KEYWORD)
            }
        };

        if is_trade { QueryKind::Trade } else { QueryKind::Knowledge }
    }
}

/// Classify with the default keyword mode
pub fn classify(text: &str) -> QueryKind {
    IntentClassifier::default().classify(text)
}
