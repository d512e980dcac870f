//! Intent Routing
//!
//! Deciding whether a query is a trade, and turning trade text into a
//! structured [`TradeIntent`](crate::model::TradeIntent).

mod classifier;
mod parser;

pub use classifier::{
    classify, ClassifierMode, IntentClassifier, STRICT_DESTINATION_KEYWORD,
    STRICT_SOURCE_KEYWORDS, TRADE_KEYWORDS,
};
pub use parser::parse;
