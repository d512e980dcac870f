//! Document Search
//!
//! Retrieval side of the RAG pipeline: an [`Embedder`] turns a query into a
//! vector and a [`DocumentSearch`] returns the closest passages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Separator placed between passages when building a context string
pub const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// A retrieved text passage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Point/document identifier in the backing store
    pub id: String,

    /// Passage text
    pub text: String,

    /// Similarity score, if the backend reports one
    #[serde(default)]
    pub score: Option<f32>,
}

impl Passage {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score: None,
        }
    }

    pub const fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Join passages into a single context string, preserving order
pub fn join_passages(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(PASSAGE_SEPARATOR)
}

/// Turns text into an embedding vector
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single query
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Ordered passage retrieval
#[async_trait]
pub trait DocumentSearch: Send + Sync {
    /// Return up to `limit` passages, most relevant first
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>>;

    /// Backend name for logs and health output
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_passages_keeps_order() {
        let passages = vec![Passage::new("1", "first"), Passage::new("2", "second")];
        assert_eq!(join_passages(&passages), "first\n\n---\n\nsecond");
    }

    #[test]
    fn test_join_passages_empty() {
        assert_eq!(join_passages(&[]), "");
    }
}
