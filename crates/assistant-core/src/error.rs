//! Error Types

use thiserror::Error;

/// Result type alias for collaborator operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by external collaborators (LLM, search, embeddings)
#[derive(Error, Debug)]
pub enum CoreError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Vector search failed
    #[error("Search error: {0}")]
    Search(String),

    /// Query embedding failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Collaborator did not answer in time
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// Unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CoreError::Timeout(60).to_string(), "Timed out after 60s");
        assert_eq!(
            CoreError::Auth("Qdrant rejected credentials (401)".into()).to_string(),
            "Authentication failed: Qdrant rejected credentials (401)"
        );
    }
}
