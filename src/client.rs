//! Chat client
//!
//! One request/response exchange with the chat-completions backend.
//! The HTTP leg is behind the `Transport` trait so the core only ever
//! hands a request body string out and receives a response body string
//! back. Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::protocol::{ChatRequest, ChatResponse};
use crate::Result;

const CHAT_COMPLETIONS_PATH: &str = "/api/v3/chat/completions";

/// Transport collaborator: posts a serialized request body, returns the
/// raw response body. Exactly one attempt; no retry, timeout or backoff.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: String) -> Result<String>;
}

/// HTTPS transport against the configured backend (connection-pooled).
pub struct HttpTransport {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .map_err(|e| AgentError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AgentError::Config("API key not configured".to_string()));
        }

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat backend request failed: {}", e);
                AgentError::Transport(format!("Chat backend error: {}", e))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AgentError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Chat backend error response ({}): {}", status, text);
            return Err(AgentError::Transport(format!(
                "Chat backend returned {}: {}",
                status, text
            )));
        }

        Ok(text)
    }
}

/// Serializes requests, performs one round trip, deserializes responses.
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    model: String,
}

impl ChatClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
            model: config.model.clone(),
        })
    }

    /// Build a client on top of a custom transport (tests, alternative
    /// backends).
    pub fn with_transport(transport: Arc<dyn Transport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One best-effort exchange. The caller decides whether to resurface a
    /// failure to the user.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let body = serde_json::to_string(request)?;

        info!(model = %request.model, messages = request.messages.len(), "Sending chat request");

        let response_body = self.transport.post(body).await?;

        let response: ChatResponse = serde_json::from_str(&response_body).map_err(|e| {
            error!("Failed to parse chat response: {}", e);
            AgentError::Transport(format!("Malformed response envelope: {}", e))
        })?;

        info!(
            response_id = %response.id,
            total_tokens = response.usage.total_tokens,
            "Chat response received"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::build_chat_request;

    struct CannedTransport {
        body: String,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn post(&self, _body: String) -> Result<String> {
            Ok(self.body.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn post(&self, _body: String) -> Result<String> {
            Err(AgentError::Transport("connection refused".to_string()))
        }
    }

    fn stop_response(content: &str) -> String {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1731900000,
            "model": "test-fc",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_send_decodes_response() {
        let client = ChatClient::with_transport(
            Arc::new(CannedTransport {
                body: stop_response("hello"),
            }),
            "test-fc",
        );
        let request = build_chat_request("test-fc", "hi", &[], &[]).unwrap();

        let response = client.send(&request).await.unwrap();
        assert_eq!(response.choices[0].message.content, "hello");
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_transport_error() {
        let client = ChatClient::with_transport(
            Arc::new(CannedTransport {
                body: "not json".to_string(),
            }),
            "test-fc",
        );
        let request = build_chat_request("test-fc", "hi", &[], &[]).unwrap();

        assert!(matches!(
            client.send(&request).await,
            Err(AgentError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = ChatClient::with_transport(Arc::new(FailingTransport), "test-fc");
        let request = build_chat_request("test-fc", "hi", &[], &[]).unwrap();

        assert!(matches!(
            client.send(&request).await,
            Err(AgentError::Transport(_))
        ));
    }
}
