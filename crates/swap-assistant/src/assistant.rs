//! Assistant Façade
//!
//! Classifier → (parser + oracle + calculator) or knowledge responder.
//! Every path ends in human-readable markdown; nothing here returns an error
//! to the caller.

use std::sync::Arc;

use assistant_core::{DocumentSearch, LlmProvider};
use serde::Serialize;

use crate::config::{AssistantConfig, DexConfig};
use crate::error::Result;
use crate::intent::{self, IntentClassifier};
use crate::knowledge::KnowledgeResponder;
use crate::model::{QueryKind, SwapQuote, TradeIntent};
use crate::price::{PriceOracle, PriceSource};
use crate::quote;

/// Returned when a query looks like a trade but doesn't parse
pub const FORMAT_HELP: &str =
    "❌ I couldn't read that as a swap. Try: `swap 1 usdc for near`";

/// Structured result of one query
#[derive(Clone, Debug, Serialize)]
pub struct AssistantReply {
    pub kind: QueryKind,

    /// Markdown handed to the presentation layer
    pub text: String,

    /// Present when a swap was quoted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<SwapQuote>,
}

pub struct Assistant {
    classifier: IntentClassifier,
    oracle: PriceOracle,
    knowledge: KnowledgeResponder,
    dex: DexConfig,
}

impl Assistant {
    pub const fn new(
        classifier: IntentClassifier,
        oracle: PriceOracle,
        knowledge: KnowledgeResponder,
        dex: DexConfig,
    ) -> Self {
        Self { classifier, oracle, knowledge, dex }
    }

    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::new()
    }

    /// Final response text for `query`
    pub async fn respond(&self, query: &str) -> String {
        self.reply(query).await.text
    }

    /// Route and answer `query`
    pub async fn reply(&self, query: &str) -> AssistantReply {
        let kind = self.classifier.classify(query);
        tracing::debug!(kind = %kind, "Routed query");

        match kind {
            QueryKind::Trade => match intent::parse(query) {
                Some(intent) => {
                    let quote = self.quote(&intent).await;
                    AssistantReply {
                        kind,
                        text: self.render_quote(&quote),
                        quote: Some(quote),
                    }
                }
                None => AssistantReply {
                    kind,
                    text: FORMAT_HELP.to_string(),
                    quote: None,
                },
            },
            QueryKind::Knowledge => AssistantReply {
                kind,
                text: self.knowledge.answer(query).await,
                quote: None,
            },
        }
    }

    /// Price the intent's priced asset and compute the estimate
    pub async fn quote(&self, intent: &TradeIntent) -> SwapQuote {
        let price = self.oracle.get_price(intent.priced_symbol()).await;
        let quote = quote::compute(intent, &price);
        tracing::info!(
            from = intent.from_symbol(),
            to = intent.to_symbol(),
            amount = %intent.amount(),
            output = %quote.display_output(),
            live = price.is_live(),
            "Quoted swap"
        );
        quote
    }

    /// Fixed-format markdown for a quote, with the DEX link
    pub fn render_quote(&self, quote: &SwapQuote) -> String {
        let intent = &quote.intent;
        let price_note = if quote.price_is_live {
            "live"
        } else {
            "fallback estimate, live price unavailable"
        };
        let link_text = self.dex.url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        format!(
            "🚀 **SWAP INTENT DETECTED**\n\n\
             **💱 SWAP {amount} {from} → {to}**\n\
             • **Estimated output**: ~{output:.6} {to}\n\
             • **Price**: ${price:.4} per {priced} ({price_note})\n\
             • **Note**: Set the exact amount on {dex}.\n\n\
             ✅ **Open {dex}**\n\
             [🌐 {link_text}]({url})\n\n\
             *I guide → you confirm on-chain.*",
            amount = intent.amount(),
            from = intent.from_symbol(),
            to = intent.to_symbol(),
            output = quote.display_output(),
            price = quote.price_used,
            priced = quote.priced_symbol,
            dex = self.dex.name,
            url = self.dex.url,
        )
    }

    pub const fn oracle(&self) -> &PriceOracle {
        &self.oracle
    }

    pub const fn knowledge(&self) -> &KnowledgeResponder {
        &self.knowledge
    }

    pub const fn dex(&self) -> &DexConfig {
        &self.dex
    }
}

/// Builder wiring configuration and collaborators into an [`Assistant`]
pub struct AssistantBuilder {
    config: AssistantConfig,
    price_source: Option<Arc<dyn PriceSource>>,
    search: Option<Arc<dyn DocumentSearch>>,
    completion: Option<Arc<dyn LlmProvider>>,
}

impl Default for AssistantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantBuilder {
    pub fn new() -> Self {
        Self {
            config: AssistantConfig::default(),
            price_source: None,
            search: None,
            completion: None,
        }
    }

    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = config;
        self
    }

    pub fn price_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.price_source = Some(source);
        self
    }

    pub fn search(mut self, search: Arc<dyn DocumentSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn completion(mut self, completion: Arc<dyn LlmProvider>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Without a price source every quote uses the fallback price
    pub fn build(self) -> Result<Assistant> {
        self.config.validate()?;

        let source = self.price_source.unwrap_or_else(|| {
            Arc::new(crate::price::CoinMarketCapSource::new(&self.config.price))
        });
        let oracle = PriceOracle::new(source, &self.config.price)?;

        let mut knowledge = KnowledgeResponder::new(self.config.knowledge);
        if let Some(search) = self.search {
            knowledge = knowledge.with_search(search);
        }
        if let Some(completion) = self.completion {
            knowledge = knowledge.with_completion(completion);
        }

        Ok(Assistant::new(
            IntentClassifier::new(self.config.classifier),
            oracle,
            knowledge,
            self.config.dex,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;
    use crate::knowledge::{faq_lookup, FALLBACK_ANSWER};
    use crate::price::StaticPriceSource;
    use assistant_core::provider::{Completion, GenerationOptions, ModelInfo};
    use assistant_core::{CoreError, Message, Passage};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct HangingSource;

    #[async_trait]
    impl PriceSource for HangingSource {
        async fn fetch_usd_price(&self, _symbol: &str) -> Result<Decimal> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(AssistantError::PriceUnavailable("never".into()))
        }

        fn name(&self) -> &str {
            "Hanging"
        }
    }

    #[derive(Default)]
    struct FailingSearch {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentSearch for FailingSearch {
        async fn search(&self, _query: &str, _limit: usize) -> assistant_core::Result<Vec<Passage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CoreError::Search("connection refused".into()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[derive(Default)]
    struct FailingLlm {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for FailingLlm {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn health_check(&self) -> assistant_core::Result<bool> {
            Ok(false)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _options: &GenerationOptions,
        ) -> assistant_core::Result<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CoreError::ProviderUnavailable("offline".into()))
        }

        async fn list_models(&self) -> assistant_core::Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    fn quick_config() -> AssistantConfig {
        let mut config = AssistantConfig::default();
        config.price.timeout = Duration::from_millis(100);
        config.price.cache_ttl = Duration::ZERO;
        config
    }

    fn assistant_with(source: Arc<dyn PriceSource>) -> Assistant {
        Assistant::builder()
            .config(quick_config())
            .price_source(source)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_swap_quote_with_live_price() {
        let assistant = assistant_with(Arc::new(StaticPriceSource::empty().with_price("NEAR", dec!(4.00))));

        let response = assistant.respond("swap 1 usdc for near").await;
        assert!(response.contains("0.250000 NEAR"), "{response}");
        assert!(response.contains("rhea.finance"));
        assert!(response.contains("$4.0000 per NEAR (live)"));
    }

    #[tokio::test]
    async fn test_swap_quote_with_timed_out_price() {
        let assistant = assistant_with(Arc::new(HangingSource));

        let reply = assistant.reply("swap 10 usdc for near").await;
        let quote = reply.quote.expect("trade should be quoted");
        assert_eq!(quote.price_used, dec!(1.75));
        assert!(!quote.price_is_live);
        assert!(reply.text.contains("~5.714286 NEAR"), "{}", reply.text);
        assert!(reply.text.contains("$1.7500 per NEAR"));
        assert!(reply.text.contains("https://app.rhea.finance"));
    }

    #[tokio::test]
    async fn test_sell_direction_multiplies() {
        let assistant = assistant_with(Arc::new(StaticPriceSource::empty().with_price("NEAR", dec!(4))));

        let reply = assistant.reply("swap 3 near for usdc").await;
        assert_eq!(reply.quote.unwrap().output_amount, dec!(12));
        assert!(reply.text.contains("~12.000000 USDC"));
    }

    #[tokio::test]
    async fn test_faq_answer_makes_no_external_call() {
        let search = Arc::new(FailingSearch::default());
        let llm = Arc::new(FailingLlm::default());
        let assistant = Assistant::builder()
            .config(quick_config())
            .price_source(Arc::new(StaticPriceSource::new()))
            .search(search.clone())
            .completion(llm.clone())
            .build()
            .unwrap();

        let reply = assistant.reply("what is sharding").await;
        assert_eq!(reply.kind, QueryKind::Knowledge);
        assert_eq!(reply.text, faq_lookup("sharding").unwrap());
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failing_collaborators_give_fallback() {
        let assistant = Assistant::builder()
            .config(quick_config())
            .price_source(Arc::new(StaticPriceSource::new()))
            .search(Arc::new(FailingSearch::default()))
            .completion(Arc::new(FailingLlm::default()))
            .build()
            .unwrap();

        assert_eq!(assistant.respond("hello there").await, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_non_numeric_amount_gives_format_help() {
        assert!(intent::parse("swap abc usdc for near").is_none());

        let assistant = assistant_with(Arc::new(StaticPriceSource::new()));
        let reply = assistant.reply("swap abc usdc for near").await;
        assert_eq!(reply.kind, QueryKind::Trade);
        assert_eq!(reply.text, FORMAT_HELP);
        assert!(reply.quote.is_none());
    }

    #[tokio::test]
    async fn test_trade_keyword_without_swap_gives_format_help() {
        let assistant = assistant_with(Arc::new(StaticPriceSource::new()));
        assert_eq!(assistant.respond("how do I bridge to aurora?").await, FORMAT_HELP);
    }

    #[tokio::test]
    async fn test_strict_mode_reaches_bridge_faq() {
        let mut config = quick_config();
        config.classifier = crate::intent::ClassifierMode::Strict;
        let assistant = Assistant::builder()
            .config(config)
            .price_source(Arc::new(StaticPriceSource::new()))
            .build()
            .unwrap();

        let reply = assistant.reply("how do I bridge to aurora?").await;
        assert_eq!(reply.kind, QueryKind::Knowledge);
        assert_eq!(reply.text, faq_lookup("bridge").unwrap());
    }

    #[tokio::test]
    async fn test_custom_dex_link() {
        let mut config = quick_config();
        config.dex = DexConfig { name: "Ref".into(), url: "https://app.ref.finance/".into() };
        let assistant = Assistant::builder()
            .config(config)
            .price_source(Arc::new(StaticPriceSource::new()))
            .build()
            .unwrap();

        let response = assistant.respond("swap 2 usdc for near").await;
        assert!(response.contains("[🌐 app.ref.finance](https://app.ref.finance/)"));
        assert!(response.contains("Open Ref"));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = AssistantConfig::default();
        config.price.fallback_price = Decimal::ZERO;
        assert!(Assistant::builder().config(config).build().is_err());
    }
}
