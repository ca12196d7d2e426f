use crate::allocations::allocations_model::{BudgetAllocation, NewBudgetAllocation};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for allocation repository operations
#[async_trait]
pub trait AllocationRepositoryTrait: Send + Sync {
    fn load_allocations(&self) -> Result<Vec<BudgetAllocation>>;
    fn load_allocations_for_budget(&self, budget_id: &str) -> Result<Vec<BudgetAllocation>>;
    fn get_allocation_by_id(&self, allocation_id: &str) -> Result<BudgetAllocation>;
    async fn insert_new_allocation(
        &self,
        new_allocation: NewBudgetAllocation,
    ) -> Result<BudgetAllocation>;
    async fn delete_allocation(&self, allocation_id_to_delete: String) -> Result<usize>;
}

/// Trait for allocation service operations
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    fn get_allocations(&self) -> Result<Vec<BudgetAllocation>>;
    fn get_allocations_for_budget(&self, budget_id: &str) -> Result<Vec<BudgetAllocation>>;
    async fn create_allocation(
        &self,
        new_allocation: NewBudgetAllocation,
    ) -> Result<BudgetAllocation>;
    async fn delete_allocation(&self, allocation_id_to_delete: String) -> Result<usize>;
}
