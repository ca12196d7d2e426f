//! SQLite storage implementation for budgets.

mod model;
mod repository;

pub use model::{BudgetDB, NewBudgetDB};
pub use repository::BudgetRepository;
