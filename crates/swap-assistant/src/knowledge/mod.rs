//! Knowledge Responder
//!
//! Answers non-trade questions. A static FAQ hit is returned without any
//! external call; otherwise passages from [`DocumentSearch`] become the
//! context for an [`LlmProvider`] completion. Every failure ends in
//! [`FALLBACK_ANSWER`].

mod faq;

pub use faq::{lookup as faq_lookup, FAQ};

use std::sync::Arc;

use assistant_core::search::join_passages;
use assistant_core::{DocumentSearch, LlmProvider, Message};

use crate::config::KnowledgeConfig;
use crate::error::{AssistantError, Result};

/// Returned whenever search or completion can't produce an answer
pub const FALLBACK_ANSWER: &str = "🤔 I couldn't find an answer to that right now. \
Try a swap command like `swap 1 usdc for near`, or rephrase your question about NEAR.";

/// System prompt for document-grounded answers
pub const KNOWLEDGE_SYSTEM_PROMPT: &str = r"You are a concise assistant for the NEAR Protocol ecosystem.

Answer the user's question using the documentation excerpts provided as context.
If the context does not cover the question, say so briefly instead of guessing.
Never give financial advice and never claim to execute transactions: for swaps,
tell the user to type a command like `swap 1 usdc for near`.";

pub struct KnowledgeResponder {
    search: Option<Arc<dyn DocumentSearch>>,
    completion: Option<Arc<dyn LlmProvider>>,
    config: KnowledgeConfig,
}

impl KnowledgeResponder {
    /// FAQ-only responder; attach collaborators with the `with_*` builders
    pub const fn new(config: KnowledgeConfig) -> Self {
        Self {
            search: None,
            completion: None,
            config,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn DocumentSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Without a completion provider, answers are raw documentation excerpts
    pub fn with_completion(mut self, completion: Arc<dyn LlmProvider>) -> Self {
        self.completion = Some(completion);
        self
    }

    pub const fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub const fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Answer `query`; never fails
    pub async fn answer(&self, query: &str) -> String {
        match self.try_answer(query).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Knowledge lookup failed, using fallback: {}", e);
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    /// Answer `query`, or the reason no answer was produced
    pub async fn try_answer(&self, query: &str) -> Result<String> {
        if let Some(canned) = faq::lookup(query) {
            tracing::debug!("Answered from FAQ");
            return Ok(canned.to_string());
        }

        let search = self.search
            .as_ref()
            .ok_or_else(|| AssistantError::NoAnswer("no document search configured".into()))?;

        let passages = search.search(query, self.config.top_k).await?;
        tracing::debug!(backend = search.name(), passages = passages.len(), "Retrieved context");
        let context = join_passages(&passages);

        let Some(completion) = &self.completion else {
            return self.docs_excerpt(&context);
        };

        let context = truncate_chars(&context, self.config.max_context_chars);
        let messages = [
            Message::system(KNOWLEDGE_SYSTEM_PROMPT),
            Message::user(build_user_prompt(query, &context)),
        ];

        let answer = completion
            .complete(&messages, &self.config.generation)
            .await?
            .content;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AssistantError::NoAnswer(format!(
                "{} returned an empty completion",
                completion.name()
            )));
        }
        Ok(answer.to_string())
    }

    fn docs_excerpt(&self, context: &str) -> Result<String> {
        if context.trim().is_empty() {
            return Err(AssistantError::NoAnswer("no matching documentation".into()));
        }
        let excerpt = truncate_chars(context, self.config.excerpt_chars);
        let ellipsis = if excerpt.len() < context.len() { "..." } else { "" };
        Ok(format!("📚 **NEAR Docs**\n\n{excerpt}{ellipsis}"))
    }
}

fn build_user_prompt(query: &str, context: &str) -> String {
    if context.trim().is_empty() {
        format!("Context: (no matching documentation)\n\nQuestion: {query}")
    } else {
        format!("Context:\n{context}\n\nQuestion: {query}")
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
