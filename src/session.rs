//! Conversation session
//!
//! One conversation with the backend: owns the ledger, the append-only
//! message history, the dispatcher and a chat client, and runs the full
//! turn pipeline (build, send, resolve, dispatch). `chat` takes `&mut
//! self`, so a second exchange cannot start before the first resolves.

use std::sync::Arc;
use tracing::warn;

use crate::client::ChatClient;
use crate::config::AgentConfig;
use crate::dispatch::{ActionDispatcher, LedgerObserver};
use crate::error::AgentError;
use crate::ledger::Ledger;
use crate::protocol::ChatMessage;
use crate::request::build_chat_request;
use crate::resolver::{self, Resolution};
use crate::models::DispatchOutcome;
use crate::Result;

/// What one conversational turn produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// A mutating action was applied to the ledger.
    LedgerChanged,
    /// The backend answered with plain text; the ledger is untouched.
    Reply(String),
    /// The turn was discarded (empty utterance, undecodable payload, or a
    /// read-only action).
    NoEffect,
}

pub struct ExpenseSession {
    client: ChatClient,
    dispatcher: ActionDispatcher,
    ledger: Ledger,
    history: Vec<ChatMessage>,
}

impl ExpenseSession {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self::with_client(ChatClient::new(config)?))
    }

    pub fn with_client(client: ChatClient) -> Self {
        Self {
            client,
            dispatcher: ActionDispatcher::new(),
            ledger: Ledger::new(),
            history: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn LedgerObserver>) {
        self.dispatcher.add_observer(observer);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Run one turn. Transport failures and missing-entry errors propagate
    /// to the caller; decode failures discard the turn with a logged
    /// diagnostic and leave all state unchanged.
    pub async fn chat(&mut self, utterance: &str) -> Result<TurnOutcome> {
        if utterance.trim().is_empty() {
            return Ok(TurnOutcome::NoEffect);
        }

        let request = build_chat_request(
            self.client.model(),
            utterance,
            self.ledger.all(),
            &self.history,
        )?;

        let response = self.client.send(&request).await?;

        let resolution = match resolver::resolve(&response) {
            Ok(resolution) => resolution,
            Err(AgentError::Decode(reason)) => {
                warn!(%reason, "Discarding turn: response did not decode into an action");
                return Ok(TurnOutcome::NoEffect);
            }
            Err(e) => return Err(e),
        };

        match resolution {
            Resolution::Action(action) => {
                let outcome =
                    self.dispatcher
                        .dispatch(action, &mut self.ledger, &mut self.history)?;
                Ok(match outcome {
                    DispatchOutcome::Mutated => TurnOutcome::LedgerChanged,
                    DispatchOutcome::ReadOnly => TurnOutcome::NoEffect,
                })
            }
            Resolution::Text(text) => Ok(TurnOutcome::Reply(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Transport;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedTransport {
        body: String,
        requests: AtomicUsize,
    }

    impl CannedTransport {
        fn new(body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                body: body.into(),
                requests: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn post(&self, _body: String) -> Result<String> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.clone())
        }
    }

    fn session_with(transport: Arc<CannedTransport>) -> ExpenseSession {
        ExpenseSession::with_client(ChatClient::with_transport(transport, "test-fc"))
    }

    fn tool_call_response(name: &str, arguments: &str) -> String {
        serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1731900000,
            "model": "test-fc",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {"name": name, "arguments": arguments}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        })
        .to_string()
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
    async fn test_tool_call_add_mutates_ledger() {
        let transport = CannedTransport::new(tool_call_response(
            "AddExpense",
            r#"{"title":"pants","amount":10,"category":"clothing"}"#,
        ));
        let mut session = session_with(transport);

        let outcome = session.chat("bought pants for 10").await.unwrap();

        assert_eq!(outcome, TurnOutcome::LedgerChanged);
        assert_eq!(session.ledger().len(), 1);

        let entry = &session.ledger().all()[0];
        assert_eq!(entry.title, "pants");
        assert_eq!(entry.amount, 10.0);
        assert_eq!(entry.category, "clothing");
        assert!(!entry.id.is_empty());

        // The new ledger state was appended for the next turn.
        assert_eq!(session.history().len(), 1);
        assert!(session.history()[0].content.contains("pants"));
    }

    #[tokio::test]
    async fn test_legacy_content_delete() {
        let transport = CannedTransport::new(tool_call_response(
            "AddExpense",
            r#"{"id":"abc","title":"pants","amount":10,"category":"clothing"}"#,
        ));
        let mut session = session_with(transport);
        session.chat("bought pants").await.unwrap();

        let transport = CannedTransport::new(stop_response(
            r#"{"name":"DeleteExpense","parameters":{"id":"abc"}}"#,
        ));
        let client = ChatClient::with_transport(transport, "test-fc");
        session.client = client;

        let outcome = session.chat("remove the pants").await.unwrap();
        assert_eq!(outcome, TurnOutcome::LedgerChanged);
        assert!(session.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_arguments_discard_turn() {
        let transport = CannedTransport::new(tool_call_response("AddExpense", "{broken"));
        let mut session = session_with(transport);

        let outcome = session.chat("bought pants").await.unwrap();

        assert_eq!(outcome, TurnOutcome::NoEffect);
        assert!(session.ledger().is_empty());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_plain_text_reply_has_no_ledger_effect() {
        let transport = CannedTransport::new(stop_response("You have no expenses yet."));
        let mut session = session_with(transport);

        let outcome = session.chat("how much did I spend?").await.unwrap();

        assert_eq!(
            outcome,
            TurnOutcome::Reply("You have no expenses yet.".to_string())
        );
        assert!(session.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_empty_utterance_issues_no_request() {
        let transport = CannedTransport::new(stop_response("unused"));
        let mut session = session_with(transport.clone());

        let outcome = session.chat("   ").await.unwrap();

        assert_eq!(outcome, TurnOutcome::NoEffect);
        assert_eq!(transport.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_entry_fails_turn() {
        let transport = CannedTransport::new(tool_call_response(
            "DeleteExpense",
            r#"{"id":"no-such-id"}"#,
        ));
        let mut session = session_with(transport);

        let result = session.chat("delete the pants").await;
        assert!(matches!(result, Err(AgentError::EntryNotFound(_))));
        assert!(session.ledger().is_empty());
    }
}
