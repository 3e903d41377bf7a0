//! Core data models for the expense agent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Placeholder title for entries the model returned without one.
pub const DEFAULT_TITLE: &str = "unknown";
/// Placeholder category for entries the model returned without one.
pub const DEFAULT_CATEGORY: &str = "other";

//
// ================= Expense Entry =================
//

/// One expense record in the ledger.
///
/// The id is immutable once assigned and uniquely addresses exactly one
/// entry within the ledger's current set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseEntry {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl ExpenseEntry {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            amount,
            category: category.into(),
            date: Utc::now(),
        }
    }
}

/// Model output is semi-structured: any field may be absent. Missing fields
/// are filled with fixed defaults instead of rejecting the payload, so a
/// partially specified tool call still produces a usable entry.
impl<'de> Deserialize<'de> for ExpenseEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawEntry {
            id: Option<String>,
            title: Option<String>,
            amount: Option<f64>,
            category: Option<String>,
            date: Option<DateTime<Utc>>,
        }

        let raw = RawEntry::deserialize(deserializer)?;

        Ok(ExpenseEntry {
            id: raw.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: raw.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            amount: raw.amount.unwrap_or(0.0),
            category: raw.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            date: raw.date.unwrap_or_else(Utc::now),
        })
    }
}

//
// ================= Actions =================
//

/// Wire names of the actions the backend may invoke. `SearchExpnse` and
/// `GetTotalExpense` are spelled exactly as the deployed backend emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionName {
    #[serde(rename = "AddExpense")]
    Add,
    #[serde(rename = "DeleteExpense")]
    Delete,
    #[serde(rename = "UpdateExpense")]
    Update,
    #[serde(rename = "SearchExpnse")]
    Search,
    #[serde(rename = "GetTotalExpense")]
    FetchAll,
}

impl ActionName {
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "AddExpense" => Some(Self::Add),
            "DeleteExpense" => Some(Self::Delete),
            "UpdateExpense" => Some(Self::Update),
            "SearchExpnse" => Some(Self::Search),
            "GetTotalExpense" => Some(Self::FetchAll),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "AddExpense",
            Self::Delete => "DeleteExpense",
            Self::Update => "UpdateExpense",
            Self::Search => "SearchExpnse",
            Self::FetchAll => "GetTotalExpense",
        }
    }
}

/// A decoded, typed action ready for dispatch. Closed sum type so every
/// branch, including the read-only ones, is matched explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add(ExpenseEntry),
    Delete(ExpenseEntry),
    Update(ExpenseEntry),
    Search(ExpenseEntry),
    FetchAll(ExpenseEntry),
}

impl Action {
    pub fn from_parts(name: ActionName, entry: ExpenseEntry) -> Self {
        match name {
            ActionName::Add => Self::Add(entry),
            ActionName::Delete => Self::Delete(entry),
            ActionName::Update => Self::Update(entry),
            ActionName::Search => Self::Search(entry),
            ActionName::FetchAll => Self::FetchAll(entry),
        }
    }

    pub fn name(&self) -> ActionName {
        match self {
            Self::Add(_) => ActionName::Add,
            Self::Delete(_) => ActionName::Delete,
            Self::Update(_) => ActionName::Update,
            Self::Search(_) => ActionName::Search,
            Self::FetchAll(_) => ActionName::FetchAll,
        }
    }
}

/// Legacy content payload: the backend sometimes answers with a plain JSON
/// object `{"name": ..., "parameters": ...}` in the message content instead
/// of a structured tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionEnvelope {
    pub name: ActionName,
    pub parameters: ExpenseEntry,
}

//
// ================= Dispatch Outcome =================
//

/// Successful result of applying an action to the ledger. Failures travel
/// as `AgentError` through `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The ledger changed (add, delete or update applied).
    Mutated,
    /// A read-only action; the ledger is untouched.
    ReadOnly,
}
