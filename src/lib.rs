//! LLM Expense-Ledger Agent
//!
//! Turns a free-text utterance into a validated mutation of an in-memory
//! expense ledger:
//! - Describes bookkeeping actions to a chat-completions backend as tools
//! - Performs one request/response exchange per turn (no streaming)
//! - Resolves tool calls (or legacy JSON-in-content answers) into typed
//!   actions
//! - Dispatches actions against the ledger and feeds updated ledger state
//!   back into the conversation for subsequent turns
//!
//! TURN PIPELINE:
//! UTTERANCE → BUILD REQUEST → SEND → RESOLVE → DISPATCH → NOTIFY

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod models;
pub mod protocol;
pub mod request;
pub mod resolver;
pub mod session;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use config::AgentConfig;
pub use dispatch::LedgerObserver;
pub use ledger::Ledger;
pub use models::*;
pub use session::{ExpenseSession, TurnOutcome};
