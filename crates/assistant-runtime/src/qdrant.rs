//! Qdrant Document Search
//!
//! `DocumentSearch` over Qdrant's REST API. The query is embedded, padded
//! with zeros up to the collection's vector size, and sent to
//! `collections/{name}/points/search`. Passage text comes from the
//! `content` payload field.

use std::sync::Arc;
use std::time::Duration;

use assistant_core::{CoreError, DocumentSearch, Embedder, Passage, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::env_var;

/// Payload key holding the passage text
const PAYLOAD_KEY_CONTENT: &str = "content";

/// Connection settings for a Qdrant collection
#[derive(Clone, Debug)]
pub struct QdrantConfig {
    /// Qdrant server URL (e.g., "https://xyz.cloud.qdrant.io:6333")
    pub url: String,

    /// API key for Qdrant Cloud; local instances usually run without one
    pub api_key: Option<String>,

    /// Collection to search
    pub collection: String,

    /// Dimensionality of the stored vectors
    pub vector_size: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection: "near_docs".into(),
            vector_size: 1536,
            timeout_secs: 10,
        }
    }

    /// `None` when `QDRANT_URL` is unset, meaning search is disabled
    pub fn from_env() -> Option<Self> {
        let url = env_var("QDRANT_URL")?;
        let mut config = Self::new(url);
        config.api_key = env_var("QDRANT_API_KEY");
        if let Some(collection) = env_var("QDRANT_COLLECTION") {
            config.collection = collection;
        }
        if let Some(size) = env_var("QDRANT_VECTOR_SIZE").and_then(|s| s.parse().ok()) {
            config.vector_size = size;
        }
        Some(config)
    }
}

#[derive(Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: serde_json::Value,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default)]
    payload: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ScoredPoint {
    fn into_passage(self) -> Passage {
        let id = match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let text = self.payload
            .as_ref()
            .and_then(|p| p.get(PAYLOAD_KEY_CONTENT))
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| format!("Chunk ID: {id}"), str::to_string);

        let passage = Passage::new(id, text);
        match self.score {
            Some(score) => passage.with_score(score),
            None => passage,
        }
    }
}

/// Zero-pad a vector to `size`; vectors longer than the collection are rejected
fn pad_vector(mut vector: Vec<f32>, size: usize) -> Result<Vec<f32>> {
    if vector.len() > size {
        return Err(CoreError::Embedding(format!(
            "embedding has {} dimensions, collection expects {}",
            vector.len(),
            size
        )));
    }
    vector.resize(size, 0.0);
    Ok(vector)
}

/// Qdrant-backed passage search
pub struct QdrantSearch {
    http: reqwest::Client,
    embedder: Arc<dyn Embedder>,
    config: QdrantConfig,
}

impl QdrantSearch {
    pub fn new(config: QdrantConfig, embedder: Arc<dyn Embedder>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { http, embedder, config }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/collections/{}/points/search",
            self.config.url.trim_end_matches('/'),
            self.config.collection
        )
    }
}

#[async_trait]
impl DocumentSearch for QdrantSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Passage>> {
        let vector = pad_vector(self.embedder.embed(query).await?, self.config.vector_size)?;

        let mut request = self.http
            .post(self.search_url())
            .json(&SearchRequest { vector, limit, with_payload: true });
        if let Some(key) = &self.config.api_key {
            request = request.header("api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::Search(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CoreError::Auth(format!("Qdrant rejected credentials ({status})")));
        }
        if !status.is_success() {
            return Err(CoreError::Search(format!("Qdrant returned {status}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;

        tracing::debug!(hits = body.result.len(), collection = %self.config.collection, "Qdrant search");
        Ok(body.result.into_iter().map(ScoredPoint::into_passage).collect())
    }

    fn name(&self) -> &str {
        "Qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn search_for(server: &MockServer) -> QdrantSearch {
        let mut config = QdrantConfig::new(server.uri());
        config.api_key = Some("test-key".into());
        config.vector_size = 4;
        QdrantSearch::new(config, Arc::new(FixedEmbedder(vec![0.5, 0.5])))
    }

    #[test]
    fn test_pad_vector() {
        assert_eq!(pad_vector(vec![1.0], 3).unwrap(), vec![1.0, 0.0, 0.0]);
        assert!(pad_vector(vec![1.0, 2.0], 1).is_err());
    }

    #[tokio::test]
    async fn test_search_maps_payload_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/near_docs/points/search"))
            .and(header("api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [
                    {"id": 7, "score": 0.91, "payload": {"content": "Nightshade shards state."}},
                    {"id": "b1c2", "score": 0.80, "payload": {}}
                ],
                "status": "ok",
                "time": 0.001
            })))
            .mount(&server)
            .await;

        let passages = search_for(&server).search("sharding", 3).await.unwrap();
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].text, "Nightshade shards state.");
        assert_eq!(passages[0].id, "7");
        assert_eq!(passages[1].text, "Chunk ID: b1c2");
    }

    #[tokio::test]
    async fn test_search_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = search_for(&server).search("sharding", 3).await;
        assert!(matches!(result, Err(CoreError::Auth(_))));
    }
}
