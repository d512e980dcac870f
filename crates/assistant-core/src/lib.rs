//! # assistant-core
//!
//! Provider-agnostic collaborator abstractions for the NEAR swap assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Knowledge Responder                       │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐   │
//! │  │   Embedder   │──│DocumentSearch│──│   LlmProvider    │   │
//! │  │  (vectors)   │  │  (passages)  │  │   (Strategy)     │   │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The traits here let the assistant swap Ollama, Qdrant, or in-memory test
//! doubles without changing routing or quoting logic.

pub mod error;
pub mod message;
pub mod provider;
pub mod search;

pub use error::{CoreError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use search::{DocumentSearch, Embedder, Passage};
