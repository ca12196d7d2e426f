//! Tests for BudgetService validation and delegation.

#[cfg(test)]
mod tests {
    use crate::budgets::{
        Budget, BudgetRepositoryTrait, BudgetService, BudgetServiceTrait, BudgetSummary,
        BudgetUpdate, NewBudget,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockBudgetRepository {
        budgets: Mutex<Vec<Budget>>,
    }

    impl MockBudgetRepository {
        fn with_budget(budget: Budget) -> Self {
            Self {
                budgets: Mutex::new(vec![budget]),
            }
        }
    }

    #[async_trait]
    impl BudgetRepositoryTrait for MockBudgetRepository {
        fn load_budgets(&self) -> Result<Vec<Budget>> {
            Ok(self.budgets.lock().unwrap().clone())
        }

        fn get_budget_by_id(&self, budget_id: &str) -> Result<Budget> {
            self.budgets
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.id == budget_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(budget_id.to_string())))
        }

        async fn insert_new_budget(&self, new_budget: NewBudget) -> Result<Budget> {
            let now = Utc::now().to_rfc3339();
            let budget = Budget {
                id: new_budget.id.unwrap_or_else(|| "bgt-1".to_string()),
                name: new_budget.name,
                amount: new_budget.amount,
                period_start: new_budget.period_start,
                period_end: new_budget.period_end,
                created_at: now.clone(),
                updated_at: now,
            };
            self.budgets.lock().unwrap().push(budget.clone());
            Ok(budget)
        }

        async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
            let mut budgets = self.budgets.lock().unwrap();
            let budget = budgets
                .iter_mut()
                .find(|b| b.id == budget_update.id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(budget_update.id.clone()))
                })?;
            budget.name = budget_update.name;
            budget.amount = budget_update.amount;
            budget.period_start = budget_update.period_start;
            budget.period_end = budget_update.period_end;
            budget.updated_at = Utc::now().to_rfc3339();
            Ok(budget.clone())
        }

        async fn delete_budget(&self, budget_id_to_delete: String) -> Result<usize> {
            let mut budgets = self.budgets.lock().unwrap();
            let before = budgets.len();
            budgets.retain(|b| b.id != budget_id_to_delete);
            Ok(before - budgets.len())
        }

        fn load_summary(&self, budget_id: &str) -> Result<BudgetSummary> {
            let budget = self.get_budget_by_id(budget_id)?;
            Ok(BudgetSummary {
                budget_id: budget.id,
                name: budget.name,
                allocated: budget.amount,
                additional: dec!(0),
                spent: dec!(0),
                approved_spent: dec!(0),
                remaining: budget.amount,
            })
        }
    }

    fn make_service() -> (BudgetService, Arc<MockBudgetRepository>) {
        let repository = Arc::new(MockBudgetRepository::default());
        let service = BudgetService::new(repository.clone());
        (service, repository)
    }

    fn new_budget(name: &str) -> NewBudget {
        NewBudget {
            id: None,
            name: name.to_string(),
            amount: dec!(5000000),
            period_start: "2026-01-01".to_string(),
            period_end: "2026-01-31".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_budget_persists_and_returns_row() {
        let (service, repository) = make_service();

        let created = service
            .create_budget(new_budget("Operasional Januari"))
            .await
            .unwrap();

        assert_eq!(created.name, "Operasional Januari");
        assert_eq!(created.amount, dec!(5000000));
        assert_eq!(repository.budgets.lock().unwrap().len(), 1);
        assert_eq!(service.get_budget(&created.id).unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_budget_rejects_blank_name() {
        let (service, repository) = make_service();

        let result = service.create_budget(new_budget("   ")).await;

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(repository.budgets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_budget_rejects_negative_amount() {
        let (service, _) = make_service();

        let mut input = new_budget("Operasional");
        input.amount = dec!(-1);
        let result = service.create_budget(input).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_budget_rejects_inverted_period() {
        let (service, _) = make_service();

        let mut input = new_budget("Operasional");
        input.period_start = "2026-02-01".to_string();
        input.period_end = "2026-01-01".to_string();
        let result = service.create_budget(input).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_budget_rejects_malformed_period_date() {
        let (service, _) = make_service();

        let mut input = new_budget("Operasional");
        input.period_end = "31-01-2026".to_string();
        let result = service.create_budget(input).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_budget_applies_changes() {
        let (service, _) = make_service();
        let created = service.create_budget(new_budget("Lama")).await.unwrap();

        let updated = service
            .update_budget(BudgetUpdate {
                id: created.id.clone(),
                name: "Baru".to_string(),
                amount: dec!(7500000),
                period_start: created.period_start.clone(),
                period_end: created.period_end.clone(),
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Baru");
        assert_eq!(updated.amount, dec!(7500000));
        assert_eq!(service.get_budget(&created.id).unwrap().name, "Baru");
    }

    #[tokio::test]
    async fn test_delete_budget_reports_removed_rows() {
        let (service, _) = make_service();
        let created = service.create_budget(new_budget("Sementara")).await.unwrap();

        assert_eq!(service.delete_budget(created.id.clone()).await.unwrap(), 1);
        assert_eq!(service.delete_budget(created.id).await.unwrap(), 0);
        assert!(service.get_budgets().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_budget_summary_delegates_to_repository() {
        let now = Utc::now().to_rfc3339();
        let repository = Arc::new(MockBudgetRepository::with_budget(Budget {
            id: "bgt-9".to_string(),
            name: "Pemasaran".to_string(),
            amount: dec!(2000000),
            period_start: "2026-03-01".to_string(),
            period_end: "2026-03-31".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }));
        let service = BudgetService::new(repository);

        let summary = service.get_budget_summary("bgt-9").unwrap();

        assert_eq!(summary.budget_id, "bgt-9");
        assert_eq!(summary.allocated, dec!(2000000));
        assert_eq!(summary.remaining, dec!(2000000));
    }
}
