//! Tests for AllocationService top-ups and revalidation.

#[cfg(test)]
mod tests {
    use crate::allocations::{
        AllocationRepositoryTrait, AllocationService, AllocationServiceTrait, BudgetAllocation,
        NewBudgetAllocation,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use crate::revalidation::{BestEffortOutcome, RevalidationServiceTrait};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockAllocationRepository {
        allocations: Mutex<Vec<BudgetAllocation>>,
    }

    #[async_trait]
    impl AllocationRepositoryTrait for MockAllocationRepository {
        fn load_allocations(&self) -> Result<Vec<BudgetAllocation>> {
            Ok(self.allocations.lock().unwrap().clone())
        }

        fn load_allocations_for_budget(&self, budget_id: &str) -> Result<Vec<BudgetAllocation>> {
            Ok(self
                .allocations
                .lock()
                .unwrap()
                .iter()
                .filter(|a| a.budget_id == budget_id)
                .cloned()
                .collect())
        }

        fn get_allocation_by_id(&self, allocation_id: &str) -> Result<BudgetAllocation> {
            self.allocations
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == allocation_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(allocation_id.to_string())))
        }

        async fn insert_new_allocation(
            &self,
            new_allocation: NewBudgetAllocation,
        ) -> Result<BudgetAllocation> {
            let mut allocations = self.allocations.lock().unwrap();
            let now = Utc::now().to_rfc3339();
            let allocation = BudgetAllocation {
                id: new_allocation
                    .id
                    .unwrap_or_else(|| format!("alo-{}", allocations.len() + 1)),
                budget_id: new_allocation.budget_id,
                amount: new_allocation.amount,
                reason: new_allocation.reason,
                created_at: now.clone(),
                updated_at: now,
            };
            allocations.push(allocation.clone());
            Ok(allocation)
        }

        async fn delete_allocation(&self, allocation_id_to_delete: String) -> Result<usize> {
            let mut allocations = self.allocations.lock().unwrap();
            let before = allocations.len();
            allocations.retain(|a| a.id != allocation_id_to_delete);
            Ok(before - allocations.len())
        }
    }

    #[derive(Default)]
    struct RecordingRevalidation {
        impacts: Mutex<Vec<(String, Decimal, bool)>>,
    }

    #[async_trait]
    impl RevalidationServiceTrait for RecordingRevalidation {
        async fn record_budget_impact(
            &self,
            budget_id: &str,
            expense_amount: Decimal,
            approved: bool,
        ) -> BestEffortOutcome {
            self.impacts
                .lock()
                .unwrap()
                .push((budget_id.to_string(), expense_amount, approved));
            BestEffortOutcome::Completed
        }

        async fn track_usage(
            &self,
            _budget_id: &str,
            _expense_amount: Decimal,
            _expense_id: &str,
        ) -> BestEffortOutcome {
            panic!("allocations must not write usage history");
        }
    }

    fn make_service() -> (
        AllocationService,
        Arc<MockAllocationRepository>,
        Arc<RecordingRevalidation>,
    ) {
        let repository = Arc::new(MockAllocationRepository::default());
        let revalidation = Arc::new(RecordingRevalidation::default());
        let service =
            AllocationService::new(repository.clone()).with_revalidation(revalidation.clone());
        (service, repository, revalidation)
    }

    fn new_allocation(budget_id: &str, amount: Decimal) -> NewBudgetAllocation {
        NewBudgetAllocation {
            id: None,
            budget_id: budget_id.to_string(),
            amount,
            reason: "Tambahan dana acara".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_allocation_persists_and_revalidates() {
        let (service, repository, revalidation) = make_service();

        let created = service
            .create_allocation(new_allocation("bgt-1", dec!(500000)))
            .await
            .unwrap();

        assert_eq!(created.budget_id, "bgt-1");
        assert_eq!(repository.allocations.lock().unwrap().len(), 1);
        assert_eq!(
            revalidation.impacts.lock().unwrap().as_slice(),
            &[("bgt-1".to_string(), dec!(500000), false)]
        );
    }

    #[tokio::test]
    async fn test_create_allocation_rejects_blank_reason() {
        let (service, repository, _) = make_service();

        let mut input = new_allocation("bgt-1", dec!(500000));
        input.reason = "".to_string();
        let result = service.create_allocation(input).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(repository.allocations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_allocation_rejects_non_positive_amount() {
        let (service, _, _) = make_service();

        let result = service
            .create_allocation(new_allocation("bgt-1", dec!(-500)))
            .await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_allocation_revalidates_owning_budget() {
        let (service, _, revalidation) = make_service();
        let created = service
            .create_allocation(new_allocation("bgt-7", dec!(250000)))
            .await
            .unwrap();

        let deleted = service.delete_allocation(created.id).await.unwrap();

        assert_eq!(deleted, 1);
        let impacts = revalidation.impacts.lock().unwrap();
        assert_eq!(impacts.len(), 2);
        assert_eq!(impacts[1].0, "bgt-7");
    }

    #[tokio::test]
    async fn test_list_allocations_filters_by_budget() {
        let (service, _, _) = make_service();
        service
            .create_allocation(new_allocation("bgt-1", dec!(100000)))
            .await
            .unwrap();
        service
            .create_allocation(new_allocation("bgt-2", dec!(200000)))
            .await
            .unwrap();

        assert_eq!(service.get_allocations().unwrap().len(), 2);
        let for_budget = service.get_allocations_for_budget("bgt-2").unwrap();
        assert_eq!(for_budget.len(), 1);
        assert_eq!(for_budget[0].amount, dec!(200000));
    }
}
