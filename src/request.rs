//! Chat request builder
//!
//! Pure assembly of one outbound request: instructional preamble plus the
//! current ledger rendered as JSON in the system message, the new utterance
//! as the user message, then the accumulated history verbatim. Mutates
//! nothing.

use crate::models::ExpenseEntry;
use crate::protocol::{ChatMessage, ChatRequest};
use crate::tools;
use crate::Result;

/// Fixed sampling temperature for every exchange.
pub const TEMPERATURE: f64 = 0.8;

const SYSTEM_PREAMBLE: &str = "You are a professional bookkeeping assistant. \
Based on what the user says, choose the appropriate bookkeeping function to execute.";

/// Render the ledger snapshot into the system-message suffix.
fn ledger_context(snapshot: &[ExpenseEntry]) -> Result<String> {
    let encoded = serde_json::to_string(snapshot)?;
    Ok(format!("Currently recorded expenses:\n{}", encoded))
}

/// Build one chat request. Message order is fixed: system, user utterance,
/// then `history` appended unmodified.
pub fn build_chat_request(
    model: &str,
    utterance: &str,
    snapshot: &[ExpenseEntry],
    history: &[ChatMessage],
) -> Result<ChatRequest> {
    let system_content = format!("{}\n{}", SYSTEM_PREAMBLE, ledger_context(snapshot)?);

    let mut messages = vec![
        ChatMessage::system(system_content),
        ChatMessage::user(utterance),
    ];
    messages.extend_from_slice(history);

    Ok(ChatRequest {
        model: model.to_string(),
        messages,
        temperature: TEMPERATURE,
        tools: tools::catalog().to_vec(),
    })
}
