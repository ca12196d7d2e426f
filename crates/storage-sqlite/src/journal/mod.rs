//! SQLite storage implementation for journal entries.

mod model;
mod repository;

pub use model::{JournalEntryDB, NewJournalEntryDB};
pub use repository::JournalRepository;
