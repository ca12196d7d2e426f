//! Kasfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Kasfolio.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod allocations;
pub mod budgets;
pub mod constants;
pub mod currency;
pub mod errors;
pub mod events;
pub mod expenses;
pub mod journal;
pub mod revalidation;

// Re-export the notification pipeline types
pub use events::*;
pub use revalidation::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
