use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::journal_model::{JournalEntry, JournalEntryUpdate, NewJournalEntry};
use super::journal_traits::{JournalRepositoryTrait, JournalServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for journal bookkeeping rows. Journal pages are rendered
/// on demand, so these mutations skip the revalidation trigger.
pub struct JournalService {
    repository: Arc<dyn JournalRepositoryTrait>,
}

impl JournalService {
    /// Creates a new JournalService instance
    pub fn new(repository: Arc<dyn JournalRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate_entry(
        entry_date: &str,
        reference: &str,
        debit_account: &str,
        credit_account: &str,
        amount: Decimal,
    ) -> Result<()> {
        NaiveDate::parse_from_str(entry_date, "%Y-%m-%d").map_err(ValidationError::from)?;
        if reference.trim().is_empty() {
            return Err(ValidationError::MissingField("reference".to_string()).into());
        }
        if debit_account.trim().is_empty() {
            return Err(ValidationError::MissingField("debit_account".to_string()).into());
        }
        if credit_account.trim().is_empty() {
            return Err(ValidationError::MissingField("credit_account".to_string()).into());
        }
        if debit_account == credit_account {
            return Err(ValidationError::InvalidInput(
                "debit and credit accounts must differ".to_string(),
            )
            .into());
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "journal amount must be positive".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl JournalServiceTrait for JournalService {
    fn get_entries(&self) -> Result<Vec<JournalEntry>> {
        self.repository.load_entries()
    }

    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry> {
        self.repository.get_entry_by_id(entry_id)
    }

    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        Self::validate_entry(
            &new_entry.entry_date,
            &new_entry.reference,
            &new_entry.debit_account,
            &new_entry.credit_account,
            new_entry.amount,
        )?;
        debug!("Recording journal entry {}", new_entry.reference);
        self.repository.insert_new_entry(new_entry).await
    }

    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry> {
        Self::validate_entry(
            &entry_update.entry_date,
            &entry_update.reference,
            &entry_update.debit_account,
            &entry_update.credit_account,
            entry_update.amount,
        )?;
        self.repository.update_entry(entry_update).await
    }

    async fn delete_entry(&self, entry_id_to_delete: String) -> Result<usize> {
        self.repository.delete_entry(entry_id_to_delete).await
    }
}
