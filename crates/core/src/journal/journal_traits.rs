use crate::errors::Result;
use crate::journal::journal_model::{JournalEntry, JournalEntryUpdate, NewJournalEntry};
use async_trait::async_trait;

/// Trait for journal repository operations
#[async_trait]
pub trait JournalRepositoryTrait: Send + Sync {
    fn load_entries(&self) -> Result<Vec<JournalEntry>>;
    fn get_entry_by_id(&self, entry_id: &str) -> Result<JournalEntry>;
    async fn insert_new_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry>;
    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry>;
    async fn delete_entry(&self, entry_id_to_delete: String) -> Result<usize>;
}

/// Trait for journal service operations
#[async_trait]
pub trait JournalServiceTrait: Send + Sync {
    fn get_entries(&self) -> Result<Vec<JournalEntry>>;
    fn get_entry(&self, entry_id: &str) -> Result<JournalEntry>;
    async fn create_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry>;
    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry>;
    async fn delete_entry(&self, entry_id_to_delete: String) -> Result<usize>;
}
