//! SQLite storage implementation for additional allocations.

mod model;
mod repository;

pub use model::{BudgetAllocationDB, NewBudgetAllocationDB};
pub use repository::AllocationRepository;
