//! Journal module - domain models, services, and traits.

mod journal_model;
mod journal_service;
mod journal_traits;


pub use journal_model::{JournalEntry, JournalEntryUpdate, NewJournalEntry};
pub use journal_service::JournalService;
pub use journal_traits::{JournalRepositoryTrait, JournalServiceTrait};
