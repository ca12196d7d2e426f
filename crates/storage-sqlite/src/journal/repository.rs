use kasfolio_core::journal::{
    JournalEntry, JournalEntryUpdate, JournalRepositoryTrait, NewJournalEntry,
};
use kasfolio_core::Result;

use super::model::{JournalEntryDB, NewJournalEntryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::journal_entries;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct JournalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl JournalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        JournalRepository { pool, writer }
    }
}

#[async_trait]
impl JournalRepositoryTrait for JournalRepository {
    fn load_entries(&self) -> Result<Vec<JournalEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let entries_db = journal_entries::table
            .order((
                journal_entries::entry_date.desc(),
                journal_entries::reference.desc(),
            ))
            .load::<JournalEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(entries_db.into_iter().map(JournalEntry::from).collect())
    }

    fn get_entry_by_id(&self, entry_id: &str) -> Result<JournalEntry> {
        let mut conn = get_connection(&self.pool)?;
        let entry_db = journal_entries::table
            .find(entry_id)
            .first::<JournalEntryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(JournalEntry::from(entry_db))
    }

    async fn insert_new_entry(&self, new_entry: NewJournalEntry) -> Result<JournalEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<JournalEntry> {
                let now = Utc::now().to_rfc3339();
                let mut new_entry_db: NewJournalEntryDB = new_entry.into();
                new_entry_db.id = Some(Uuid::new_v4().to_string());
                new_entry_db.created_at = Some(now.clone());
                new_entry_db.updated_at = Some(now);

                let result_db = diesel::insert_into(journal_entries::table)
                    .values(&new_entry_db)
                    .returning(JournalEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(JournalEntry::from(result_db))
            })
            .await
    }

    async fn update_entry(&self, entry_update: JournalEntryUpdate) -> Result<JournalEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<JournalEntry> {
                let now = Utc::now().to_rfc3339();
                diesel::update(journal_entries::table.find(&entry_update.id))
                    .set((
                        journal_entries::entry_date.eq(&entry_update.entry_date),
                        journal_entries::reference.eq(&entry_update.reference),
                        journal_entries::debit_account.eq(&entry_update.debit_account),
                        journal_entries::credit_account.eq(&entry_update.credit_account),
                        journal_entries::amount.eq(entry_update.amount.to_string()),
                        journal_entries::description.eq(&entry_update.description),
                        journal_entries::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = journal_entries::table
                    .find(&entry_update.id)
                    .first::<JournalEntryDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(JournalEntry::from(result_db))
            })
            .await
    }

    async fn delete_entry(&self, entry_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(journal_entries::table.find(entry_id_to_delete))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}
