//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use swap_assistant::{PriceQuote, QueryKind, SwapQuote};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub price_source: String,
    pub price_source_configured: bool,
    pub document_search: bool,
    pub llm_connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub kind: QueryKind,
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<SwapQuote>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, code: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check with collaborator diagnostics
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm_connected = match &state.provider {
        Some(provider) => provider.health_check().await.unwrap_or(false),
        None => false,
    };
    let oracle = state.assistant.oracle();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        price_source: oracle.source_name().to_string(),
        price_source_configured: oracle.is_configured(),
        document_search: state.assistant.knowledge().has_search(),
        llm_connected,
    })
}

/// Route one message through the assistant
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(bad_request("Message must not be empty", "EMPTY_MESSAGE"));
    }

    let reply = state.assistant.reply(message).await;

    let conversation_id = payload.conversation_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    Ok(Json(ChatResponse {
        message: reply.text,
        kind: reply.kind,
        conversation_id,
        quote: reply.quote,
    }))
}

/// Current USD price for a ticker, falling back like a quote would
pub async fn price_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceQuote>, ApiError> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(bad_request("Symbol must be alphanumeric", "INVALID_SYMBOL"));
    }

    Ok(Json(state.assistant.oracle().get_price(&symbol).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use swap_assistant::{price::StaticPriceSource, Assistant, AssistantConfig};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let assistant = Assistant::builder()
            .config(AssistantConfig::default())
            .price_source(Arc::new(StaticPriceSource::empty().with_price("NEAR", dec!(4))))
            .build()
            .unwrap();

        AppState {
            assistant: Arc::new(assistant),
            provider: None,
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = crate::router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn chat(body: &str) -> Request<Body> {
        Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["price_source"], "Static");
        assert_eq!(body["document_search"], false);
        assert_eq!(body["llm_connected"], false);
    }

    #[tokio::test]
    async fn test_chat_trade_returns_quote() {
        let (status, body) = send(chat(r#"{"message": "swap 1 usdc for near", "conversation_id": "abc"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "trade");
        assert_eq!(body["conversation_id"], "abc");
        assert!(body["message"].as_str().unwrap().contains("0.250000 NEAR"));
        assert_eq!(body["quote"]["direction"], "buy");
        assert_eq!(body["quote"]["price_is_live"], true);
    }

    #[tokio::test]
    async fn test_chat_knowledge_without_collaborators() {
        let (status, body) = send(chat(r#"{"message": "what is staking"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "knowledge");
        assert!(body["message"].as_str().unwrap().contains("Staking on NEAR"));
        assert!(body.get("quote").is_none());
        assert!(!body["conversation_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let (status, body) = send(chat(r#"{"message": "   "}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_MESSAGE");
    }

    #[tokio::test]
    async fn test_price_lookup() {
        let (status, body) = send(Request::get("/api/price/near").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "NEAR");
        assert_eq!(body["is_live"], true);
    }

    #[tokio::test]
    async fn test_price_unknown_symbol_falls_back() {
        let (status, body) = send(Request::get("/api/price/XYZ").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_live"], false);
    }

    #[tokio::test]
    async fn test_price_rejects_bad_symbol() {
        let (status, body) = send(Request::get("/api/price/n-e").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SYMBOL");
    }
}
