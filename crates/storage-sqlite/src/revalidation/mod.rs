//! SQLite storage implementation for the revalidation trigger.

mod repository;

pub use repository::RevalidationRepository;
