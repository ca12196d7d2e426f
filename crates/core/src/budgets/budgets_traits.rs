use crate::budgets::budgets_model::{Budget, BudgetSummary, BudgetUpdate, NewBudget};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn load_budgets(&self) -> Result<Vec<Budget>>;
    fn get_budget_by_id(&self, budget_id: &str) -> Result<Budget>;
    async fn insert_new_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, budget_id_to_delete: String) -> Result<usize>;
    fn load_summary(&self, budget_id: &str) -> Result<BudgetSummary>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self) -> Result<Vec<Budget>>;
    fn get_budget(&self, budget_id: &str) -> Result<Budget>;
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget>;
    async fn delete_budget(&self, budget_id_to_delete: String) -> Result<usize>;
    fn get_budget_summary(&self, budget_id: &str) -> Result<BudgetSummary>;
}
