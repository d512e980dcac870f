//! Ollama Embeddings
//!
//! Query vectors from Ollama's `/api/embed` endpoint over plain HTTP.

use std::time::Duration;

use assistant_core::{CoreError, Embedder, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::env_var;

/// Embedding endpoint configuration
#[derive(Clone, Debug)]
pub struct EmbedConfig {
    /// Base URL of the Ollama server, without trailing slash
    pub base_url: String,

    /// Embedding model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "all-minilm".into(),
            timeout_secs: 10,
        }
    }
}

impl EmbedConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = env_var("OLLAMA_HOST").unwrap_or_else(|| "http://localhost".into());
        let port = env_var("OLLAMA_PORT").unwrap_or_else(|| "11434".into());
        Self {
            base_url: format!("{}:{}", host.trim_end_matches('/'), port),
            model: env_var("EMBED_MODEL").unwrap_or(defaults.model),
            ..defaults
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embedder backed by a running Ollama instance
pub struct OllamaEmbedder {
    http: reqwest::Client,
    config: EmbedConfig,
}

impl OllamaEmbedder {
    pub fn new(config: EmbedConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    pub fn from_env() -> Self {
        Self::new(EmbedConfig::from_env())
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embed", self.config.base_url);
        let response = self.http
            .post(&url)
            .json(&EmbedRequest { model: &self.config.model, input: text })
            .send()
            .await
            .map_err(|e| CoreError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::Embedding(format!(
                "embed endpoint returned {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;

        body.embeddings
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Embedding("empty embeddings list".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn embedder_for(server: &MockServer) -> OllamaEmbedder {
        OllamaEmbedder::new(EmbedConfig {
            base_url: server.uri(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_embed_returns_first_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "all-minilm",
                "embeddings": [[0.1, 0.2, 0.3]]
            })))
            .mount(&server)
            .await;

        let vector = embedder_for(&server).embed("what is staking").await.unwrap();
        assert_eq!(vector.len(), 3);
    }

    #[tokio::test]
    async fn test_embed_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = embedder_for(&server).embed("hello").await;
        assert!(matches!(result, Err(CoreError::Embedding(_))));
    }
}
