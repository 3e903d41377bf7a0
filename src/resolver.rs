//! Response resolver
//!
//! Turns one chat response into either a typed action or plain assistant
//! text. Two independent decode paths, tried in strict order: the
//! structured tool-call contract first, then the legacy single-action JSON
//! payload embedded in the message content. The backend is free to answer
//! either way, so the paths are never merged into one schema.

use tracing::debug;

use crate::error::AgentError;
use crate::models::{Action, ActionEnvelope, ActionName, ExpenseEntry};
use crate::protocol::{ChatResponse, ToolCall, FINISH_TOOL_CALLS};
use crate::Result;

/// What one response resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A decoded action ready for dispatch.
    Action(Action),
    /// Free-form assistant text with no ledger effect.
    Text(String),
}

/// Resolve one response. Only `choices[0]` is considered; additional
/// choices are ignored.
pub fn resolve(response: &ChatResponse) -> Result<Resolution> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| AgentError::Transport("Response carried no choices".to_string()))?;

    if response.choices.len() > 1 {
        debug!(
            extra = response.choices.len() - 1,
            "Ignoring additional choices in response"
        );
    }

    if choice.finish_reason == FINISH_TOOL_CALLS {
        let calls = choice.message.tool_calls.as_deref().unwrap_or_default();
        let call = calls.first().ok_or_else(|| {
            AgentError::Decode("Finish reason was tool_calls but no tool call present".to_string())
        })?;

        if calls.len() > 1 {
            debug!(
                extra = calls.len() - 1,
                "Ignoring additional tool calls in response"
            );
        }

        return decode_tool_call(call).map(Resolution::Action);
    }

    Ok(resolve_content(&choice.message.content))
}

/// Decode a tool call's name and string-encoded argument payload into an
/// action.
fn decode_tool_call(call: &ToolCall) -> Result<Action> {
    let name = ActionName::from_tool_name(&call.function.name).ok_or_else(|| {
        AgentError::Decode(format!("Unknown tool name: {}", call.function.name))
    })?;

    let entry: ExpenseEntry = serde_json::from_str(&call.function.arguments).map_err(|e| {
        AgentError::Decode(format!(
            "Invalid arguments for {}: {}",
            call.function.name, e
        ))
    })?;

    Ok(Action::from_parts(name, entry))
}

/// Legacy path: the content itself may be a `{"name", "parameters"}`
/// payload. Anything that does not decode is surfaced as plain text.
fn resolve_content(content: &str) -> Resolution {
    match serde_json::from_str::<ActionEnvelope>(content) {
        Ok(envelope) => {
            Resolution::Action(Action::from_parts(envelope.name, envelope.parameters))
        }
        Err(_) => Resolution::Text(content.to_string()),
    }
}
