//! Error types for the expense agent

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {

    // =============================
    // Core Pipeline Errors
    // =============================

    /// Network/backend failure, or a response envelope that does not decode.
    /// Never retried automatically.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Tool-call arguments or legacy content did not parse into a valid
    /// action shape. The turn is discarded; the ledger is untouched.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Delete/Update addressed an identifier absent from the ledger.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
