//! Action dispatcher
//!
//! Validates and applies a decoded action against the ledger. After an
//! Add, the full ledger is serialized into a synthetic assistant message so
//! the model sees updated state on the next turn. Mutating outcomes are
//! signalled to the rendering collaborator through `LedgerObserver`.

use std::sync::Arc;
use tracing::info;

use crate::ledger::Ledger;
use crate::models::{Action, DispatchOutcome, ExpenseEntry};
use crate::protocol::ChatMessage;
use crate::Result;

/// Rendering collaborator seam: notified with the current entries after
/// every mutating dispatch.
pub trait LedgerObserver: Send + Sync {
    fn ledger_changed(&self, entries: &[ExpenseEntry]);
}

/// State machine over the action tag.
#[derive(Default)]
pub struct ActionDispatcher {
    observers: Vec<Arc<dyn LedgerObserver>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// Apply one action. `EntryNotFound` from the ledger propagates upward
    /// unchanged; the dispatcher adds no error kinds of its own.
    pub fn dispatch(
        &self,
        action: Action,
        ledger: &mut Ledger,
        history: &mut Vec<ChatMessage>,
    ) -> Result<DispatchOutcome> {
        let outcome = match action {
            Action::Add(entry) => {
                info!(title = %entry.title, amount = entry.amount, "Adding expense");
                ledger.add(entry);

                // Re-synchronize ledger state into the conversation so the
                // model can reference the generated ids next turn.
                let snapshot = serde_json::to_string(ledger.all())?;
                history.push(ChatMessage::assistant(snapshot));

                DispatchOutcome::Mutated
            }
            Action::Delete(entry) => {
                info!(id = %entry.id, "Deleting expense");
                ledger.delete(&entry.id)?;
                DispatchOutcome::Mutated
            }
            Action::Update(entry) => {
                info!(id = %entry.id, "Updating expense");
                ledger.update(entry)?;
                DispatchOutcome::Mutated
            }
            // Read-only actions are deliberately unhandled for now: the
            // backend may name them, but they neither mutate the ledger nor
            // raise an error.
            Action::Search(_) | Action::FetchAll(_) => DispatchOutcome::ReadOnly,
        };

        if outcome == DispatchOutcome::Mutated {
            for observer in &self.observers {
                observer.ledger_changed(ledger.all());
            }
        }

        Ok(outcome)
    }
}
