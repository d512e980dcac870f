//! # assistant-runtime
//!
//! Concrete collaborators for the NEAR swap assistant.
//!
//! ## Providers
//!
//! - **Ollama** (default feature): chat completion via `ollama-rs`
//! - **Ollama embeddings**: query vectors from the `/api/embed` endpoint
//! - **Qdrant**: passage retrieval over the REST `points/search` endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use assistant_runtime::{OllamaEmbedder, OllamaProvider, QdrantConfig, QdrantSearch};
//!
//! let provider = OllamaProvider::from_env();
//! let embedder = Arc::new(OllamaEmbedder::from_env());
//! let search = QdrantConfig::from_env().map(|cfg| QdrantSearch::new(cfg, embedder));
//! ```

pub mod embed;
pub mod qdrant;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use embed::{EmbedConfig, OllamaEmbedder};
pub use qdrant::{QdrantConfig, QdrantSearch};

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use assistant_core::{
    CoreError, DocumentSearch, Embedder, LlmProvider, Message, Passage, Result, Role,
};

/// Read an environment variable, treating empty values as unset
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
