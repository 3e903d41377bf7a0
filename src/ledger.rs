//! In-memory expense ledger
//!
//! Insertion-ordered CRUD over the current set of expense entries.
//! Single-writer, single-reader; no locking required.

use crate::error::AgentError;
use crate::models::ExpenseEntry;
use crate::Result;

/// The in-memory set of expense records, in insertion order.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<ExpenseEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry. Always succeeds.
    pub fn add(&mut self, entry: ExpenseEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry with the given id.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                Ok(())
            }
            None => Err(AgentError::EntryNotFound(id.to_string())),
        }
    }

    /// Replace the entry sharing `entry.id` verbatim. There is no
    /// partial-field merge: default-filled fields overwrite stored ones.
    pub fn update(&mut self, entry: ExpenseEntry) -> Result<()> {
        match self.entries.iter().position(|e| e.id == entry.id) {
            Some(index) => {
                self.entries[index] = entry;
                Ok(())
            }
            None => Err(AgentError::EntryNotFound(entry.id)),
        }
    }

    pub fn get(&self, id: &str) -> Result<&ExpenseEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AgentError::EntryNotFound(id.to_string()))
    }

    /// All entries in insertion order.
    pub fn all(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
