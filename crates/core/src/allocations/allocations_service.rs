use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::allocations_model::{BudgetAllocation, NewBudgetAllocation};
use super::allocations_traits::{AllocationRepositoryTrait, AllocationServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::revalidation::{NoOpRevalidationService, RevalidationServiceTrait};

/// Service for additional allocations. Mutations change a budget's
/// effective envelope, so they run the revalidation trigger like
/// expense mutations do. They do not go through the update bus.
pub struct AllocationService {
    repository: Arc<dyn AllocationRepositoryTrait>,
    revalidation: Arc<dyn RevalidationServiceTrait>,
}

impl AllocationService {
    /// Creates a new AllocationService instance
    pub fn new(repository: Arc<dyn AllocationRepositoryTrait>) -> Self {
        Self {
            repository,
            revalidation: Arc::new(NoOpRevalidationService),
        }
    }

    /// Sets the revalidation trigger for this service.
    pub fn with_revalidation(mut self, revalidation: Arc<dyn RevalidationServiceTrait>) -> Self {
        self.revalidation = revalidation;
        self
    }

    async fn revalidate_after(&self, allocation: &BudgetAllocation) {
        let outcome = self
            .revalidation
            .record_budget_impact(&allocation.budget_id, allocation.amount, false)
            .await;
        if !outcome.succeeded() {
            warn!(
                "Revalidation after mutation of allocation {} did not complete",
                allocation.id
            );
        }
    }
}

#[async_trait]
impl AllocationServiceTrait for AllocationService {
    fn get_allocations(&self) -> Result<Vec<BudgetAllocation>> {
        self.repository.load_allocations()
    }

    fn get_allocations_for_budget(&self, budget_id: &str) -> Result<Vec<BudgetAllocation>> {
        self.repository.load_allocations_for_budget(budget_id)
    }

    async fn create_allocation(
        &self,
        new_allocation: NewBudgetAllocation,
    ) -> Result<BudgetAllocation> {
        if new_allocation.budget_id.trim().is_empty() {
            return Err(ValidationError::MissingField("budget_id".to_string()).into());
        }
        if new_allocation.reason.trim().is_empty() {
            return Err(ValidationError::MissingField("reason".to_string()).into());
        }
        if new_allocation.amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "allocation amount must be positive".to_string(),
            )
            .into());
        }
        debug!(
            "Allocating additional {} to budget {}",
            new_allocation.amount, new_allocation.budget_id
        );
        let created = self.repository.insert_new_allocation(new_allocation).await?;

        self.revalidate_after(&created).await;

        Ok(created)
    }

    async fn delete_allocation(&self, allocation_id_to_delete: String) -> Result<usize> {
        let allocation = self
            .repository
            .get_allocation_by_id(&allocation_id_to_delete)?;
        let deleted = self
            .repository
            .delete_allocation(allocation_id_to_delete)
            .await?;

        if deleted > 0 {
            self.revalidate_after(&allocation).await;
        }

        Ok(deleted)
    }
}
