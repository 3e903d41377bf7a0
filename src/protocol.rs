//! Chat-completions wire protocol
//!
//! Serde types for the request/response exchange with the backend. The
//! shapes mirror the OpenAI-style chat-completions contract: one request,
//! one response, tool declarations outbound and tool calls inbound.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finish reason indicating the assistant invoked a tool.
pub const FINISH_TOOL_CALLS: &str = "tool_calls";
/// Finish reason for a plain text completion.
pub const FINISH_STOP: &str = "stop";

//
// ================= Messages =================
//

/// One message in the conversation, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(rename = "tool_calls", skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: None,
        }
    }
}

/// The model's chosen invocation of a tool plus serialized arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// String-encoded JSON; not schema-validated before decode.
    pub arguments: String,
}

//
// ================= Tool Declarations =================
//

/// A declarative action description offered to the model. Documentation
/// for the backend, not an enforced schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDecl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub description: String,
    pub parameters: ToolParameters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: BTreeMap<String, ParameterSpec>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl ParameterSpec {
    pub fn new(description: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            param_type: param_type.into(),
        }
    }
}

//
// ================= Request / Response =================
//

/// Outbound request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub tools: Vec<Tool>,
}

/// Inbound response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    /// Opaque; unused downstream.
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
    #[serde(rename = "finish_reason")]
    pub finish_reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(rename = "prompt_tokens")]
    pub prompt_tokens: u32,
    #[serde(rename = "completion_tokens")]
    pub completion_tokens: u32,
    #[serde(rename = "total_tokens")]
    pub total_tokens: u32,
}
