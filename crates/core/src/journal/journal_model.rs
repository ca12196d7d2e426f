//! Journal domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for a double-entry journal row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub entry_date: String,
    pub reference: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new journal entry
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub id: Option<String>,
    pub entry_date: String,
    pub reference: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Input model for updating an existing journal entry
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryUpdate {
    pub id: String,
    pub entry_date: String,
    pub reference: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub description: Option<String>,
}
