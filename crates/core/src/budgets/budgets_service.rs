use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::budgets_model::{Budget, BudgetSummary, BudgetUpdate, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Result, ValidationError};

/// Service for managing budget envelopes
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    /// Creates a new BudgetService instance
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate_envelope(
        name: &str,
        amount: Decimal,
        period_start: &str,
        period_end: &str,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if amount < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "budget amount cannot be negative".to_string(),
            )
            .into());
        }
        let start =
            NaiveDate::parse_from_str(period_start, "%Y-%m-%d").map_err(ValidationError::from)?;
        let end =
            NaiveDate::parse_from_str(period_end, "%Y-%m-%d").map_err(ValidationError::from)?;
        if end < start {
            return Err(ValidationError::InvalidInput(format!(
                "budget period ends ({}) before it starts ({})",
                period_end, period_start
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self) -> Result<Vec<Budget>> {
        self.repository.load_budgets()
    }

    fn get_budget(&self, budget_id: &str) -> Result<Budget> {
        self.repository.get_budget_by_id(budget_id)
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        Self::validate_envelope(
            &new_budget.name,
            new_budget.amount,
            &new_budget.period_start,
            &new_budget.period_end,
        )?;
        debug!("Creating budget '{}'", new_budget.name);
        self.repository.insert_new_budget(new_budget).await
    }

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        Self::validate_envelope(
            &budget_update.name,
            budget_update.amount,
            &budget_update.period_start,
            &budget_update.period_end,
        )?;
        self.repository.update_budget(budget_update).await
    }

    async fn delete_budget(&self, budget_id_to_delete: String) -> Result<usize> {
        self.repository.delete_budget(budget_id_to_delete).await
    }

    fn get_budget_summary(&self, budget_id: &str) -> Result<BudgetSummary> {
        self.repository.load_summary(budget_id)
    }
}
