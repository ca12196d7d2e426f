//! SQLite storage implementation for Kasfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `kasfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! All other crates are database-agnostic and work with traits.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!        storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! The optional `budget_usage_history` table is not part of the migrations;
//! `RevalidationRepository` probes for it at runtime.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod allocations;
pub mod budgets;
pub mod expenses;
pub mod journal;
pub mod revalidation;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from kasfolio-core for convenience
pub use kasfolio_core::errors::{DatabaseError, Error, Result};
