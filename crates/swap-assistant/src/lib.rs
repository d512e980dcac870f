//! # swap-assistant
//!
//! Chat assistant for the NEAR ecosystem that routes each query either to a
//! swap quote or to a knowledge answer.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   TRADE    ┌────────┐   ┌─────────────┐   ┌──────────┐
//! │  Classifier  │──────────▶ │ Parser │──▶│ PriceOracle │──▶│ compute  │──▶ quote + DEX link
//! └──────┬───────┘            └───┬────┘   └─────────────┘   └──────────┘
//!        │ KNOWLEDGE              └── unparsable ──▶ format help
//!        ▼
//! ┌──────────────┐  FAQ hit ──▶ canned answer
//! │  Knowledge   │  otherwise ─▶ DocumentSearch ──▶ LlmProvider
//! │  Responder   │  any failure ─▶ fallback answer
//! └──────────────┘
//! ```
//!
//! The assistant never executes a transaction: trade replies are estimates
//! with a link to an external DEX, and the user confirms on-chain.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use swap_assistant::{Assistant, AssistantConfig};
//! use swap_assistant::price::StaticPriceSource;
//!
//! # async fn demo() -> swap_assistant::Result<()> {
//! let assistant = Assistant::builder()
//!     .config(AssistantConfig::default())
//!     .price_source(Arc::new(StaticPriceSource::new()))
//!     .build()?;
//!
//! println!("{}", assistant.respond("swap 1 usdc for near").await);
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod model;
pub mod price;
pub mod quote;

pub use assistant::{Assistant, AssistantBuilder, AssistantReply, FORMAT_HELP};
pub use config::{AssistantConfig, DexConfig, KnowledgeConfig, PriceConfig};
pub use error::{AssistantError, Result};
pub use intent::{ClassifierMode, IntentClassifier};
pub use knowledge::{KnowledgeResponder, FALLBACK_ANSWER};
pub use model::{PriceQuote, QueryKind, QuoteDirection, SwapQuote, TradeIntent};
pub use price::{PriceOracle, PriceSource};
