use crate::errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use async_trait::async_trait;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn load_expenses(&self) -> Result<Vec<Expense>>;
    fn load_expenses_for_budget(&self, budget_id: &str) -> Result<Vec<Expense>>;
    fn get_expense_by_id(&self, expense_id: &str) -> Result<Expense>;
    async fn insert_new_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    async fn approve_expense(&self, expense_id: String) -> Result<Expense>;
    async fn delete_expense(&self, expense_id_to_delete: String) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expenses(&self) -> Result<Vec<Expense>>;
    fn get_expenses_for_budget(&self, budget_id: &str) -> Result<Vec<Expense>>;
    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;
    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense>;
    async fn approve_expense(&self, expense_id: String) -> Result<Expense>;
    async fn delete_expense(&self, expense_id_to_delete: String) -> Result<usize>;
}
