use kasfolio_core::budgets::{Budget, BudgetRepositoryTrait, BudgetSummary, BudgetUpdate, NewBudget};
use kasfolio_core::Result;

use super::model::{BudgetDB, NewBudgetDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{budget_allocations, budgets, expenses};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }

    fn sum_amounts(amounts: &[String]) -> Decimal {
        amounts
            .iter()
            .map(|a| a.parse().unwrap_or(Decimal::ZERO))
            .sum()
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn load_budgets(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let budgets_db = budgets::table
            .order(budgets::period_start.desc())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(budgets_db.into_iter().map(Budget::from).collect())
    }

    fn get_budget_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let budget_db = budgets::table
            .find(budget_id)
            .first::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Budget::from(budget_db))
    }

    async fn insert_new_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().to_rfc3339();
                let mut new_budget_db: NewBudgetDB = new_budget.into();
                new_budget_db.id = Some(Uuid::new_v4().to_string());
                new_budget_db.created_at = Some(now.clone());
                new_budget_db.updated_at = Some(now);

                let result_db = diesel::insert_into(budgets::table)
                    .values(&new_budget_db)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::from(result_db))
            })
            .await
    }

    async fn update_budget(&self, budget_update: BudgetUpdate) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = Utc::now().to_rfc3339();
                diesel::update(budgets::table.find(&budget_update.id))
                    .set((
                        budgets::name.eq(&budget_update.name),
                        budgets::amount.eq(budget_update.amount.to_string()),
                        budgets::period_start.eq(&budget_update.period_start),
                        budgets::period_end.eq(&budget_update.period_end),
                        budgets::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = budgets::table
                    .find(&budget_update.id)
                    .first::<BudgetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::from(result_db))
            })
            .await
    }

    async fn delete_budget(&self, budget_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(budgets::table.find(budget_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn load_summary(&self, budget_id: &str) -> Result<BudgetSummary> {
        let mut conn = get_connection(&self.pool)?;

        let budget_db = budgets::table
            .find(budget_id)
            .first::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;

        // Amounts are text columns; sum them in Rust with Decimal.
        let expense_rows: Vec<(String, bool)> = expenses::table
            .filter(expenses::budget_id.eq(budget_id))
            .select((expenses::amount, expenses::approved))
            .load::<(String, bool)>(&mut conn)
            .map_err(StorageError::from)?;
        let allocation_amounts: Vec<String> = budget_allocations::table
            .filter(budget_allocations::budget_id.eq(budget_id))
            .select(budget_allocations::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        let allocated: Decimal = budget_db.amount.parse().unwrap_or(Decimal::ZERO);
        let additional = Self::sum_amounts(&allocation_amounts);
        let spent: Decimal = expense_rows
            .iter()
            .map(|(a, _)| a.parse().unwrap_or(Decimal::ZERO))
            .sum();
        let approved_spent: Decimal = expense_rows
            .iter()
            .filter(|(_, approved)| *approved)
            .map(|(a, _)| a.parse().unwrap_or(Decimal::ZERO))
            .sum();

        Ok(BudgetSummary {
            budget_id: budget_db.id,
            name: budget_db.name,
            allocated,
            additional,
            spent,
            approved_spent,
            remaining: allocated + additional - spent,
        })
    }
}
