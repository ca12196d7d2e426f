//! Database models for journal entries.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database model for journal entries
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::journal_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryDB {
    pub id: String,
    pub entry_date: String,
    pub reference: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new journal entry
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::journal_entries)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntryDB {
    pub id: Option<String>,
    pub entry_date: String,
    pub reference: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Conversion to domain models
impl From<JournalEntryDB> for kasfolio_core::journal::JournalEntry {
    fn from(db: JournalEntryDB) -> Self {
        Self {
            id: db.id,
            entry_date: db.entry_date,
            reference: db.reference,
            debit_account: db.debit_account,
            credit_account: db.credit_account,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<kasfolio_core::journal::NewJournalEntry> for NewJournalEntryDB {
    fn from(domain: kasfolio_core::journal::NewJournalEntry) -> Self {
        Self {
            id: domain.id,
            entry_date: domain.entry_date,
            reference: domain.reference,
            debit_account: domain.debit_account,
            credit_account: domain.credit_account,
            amount: domain.amount.to_string(),
            description: domain.description,
            created_at: None,
            updated_at: None,
        }
    }
}
