use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::revalidation::{NoOpRevalidationService, RevalidationServiceTrait};

/// Service for managing expenses.
///
/// Every committed mutation runs the revalidation trigger best-effort:
/// the primary write is authoritative and its result is never changed by
/// a revalidation failure.
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    revalidation: Arc<dyn RevalidationServiceTrait>,
}

impl ExpenseService {
    /// Creates a new ExpenseService instance
    pub fn new(repository: Arc<dyn ExpenseRepositoryTrait>) -> Self {
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

    fn validate_input(budget_id: &str, description: &str, amount: Decimal) -> Result<()> {
        if budget_id.trim().is_empty() {
            return Err(ValidationError::MissingField("budget_id".to_string()).into());
        }
        if description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()).into());
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "expense amount must be positive".to_string(),
            )
            .into());
        }
        Ok(())
    }

    async fn revalidate_after(&self, expense: &Expense, approved: bool) {
        let outcome = self
            .revalidation
            .record_budget_impact(&expense.budget_id, expense.amount, approved)
            .await;
        if !outcome.succeeded() {
            warn!(
                "Revalidation after mutation of expense {} did not complete",
                expense.id
            );
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expenses(&self) -> Result<Vec<Expense>> {
        self.repository.load_expenses()
    }

    fn get_expenses_for_budget(&self, budget_id: &str) -> Result<Vec<Expense>> {
        self.repository.load_expenses_for_budget(budget_id)
    }

    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.repository.get_expense_by_id(expense_id)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        Self::validate_input(
            &new_expense.budget_id,
            &new_expense.description,
            new_expense.amount,
        )?;
        debug!(
            "Recording expense of {} against budget {}",
            new_expense.amount, new_expense.budget_id
        );
        let created = self.repository.insert_new_expense(new_expense).await?;

        self.revalidate_after(&created, false).await;
        let usage = self
            .revalidation
            .track_usage(&created.budget_id, created.amount, &created.id)
            .await;
        if !usage.succeeded() {
            warn!("Usage history for expense {} was not recorded", created.id);
        }

        Ok(created)
    }

    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        let current = self.repository.get_expense_by_id(&expense_update.id)?;
        Self::validate_input(
            &current.budget_id,
            &expense_update.description,
            expense_update.amount,
        )?;
        let updated = self.repository.update_expense(expense_update).await?;

        self.revalidate_after(&updated, updated.approved).await;

        Ok(updated)
    }

    async fn approve_expense(&self, expense_id: String) -> Result<Expense> {
        let approved = self.repository.approve_expense(expense_id).await?;

        self.revalidate_after(&approved, true).await;

        Ok(approved)
    }

    async fn delete_expense(&self, expense_id_to_delete: String) -> Result<usize> {
        let expense = self.repository.get_expense_by_id(&expense_id_to_delete)?;
        let deleted = self.repository.delete_expense(expense_id_to_delete).await?;

        if deleted > 0 {
            self.revalidate_after(&expense, expense.approved).await;
        }

        Ok(deleted)
    }
}
