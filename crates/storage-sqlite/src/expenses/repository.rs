use kasfolio_core::expenses::{Expense, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense};
use kasfolio_core::Result;

use super::model::{ExpenseDB, NewExpenseDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::expenses;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn load_expenses(&self) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let expenses_db = expenses::table
            .order(expenses::created_at.desc())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(expenses_db.into_iter().map(Expense::from).collect())
    }

    fn load_expenses_for_budget(&self, budget_id: &str) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let expenses_db = expenses::table
            .filter(expenses::budget_id.eq(budget_id))
            .order(expenses::created_at.desc())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(expenses_db.into_iter().map(Expense::from).collect())
    }

    fn get_expense_by_id(&self, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        let expense_db = expenses::table
            .find(expense_id)
            .first::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Expense::from(expense_db))
    }

    async fn insert_new_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = Utc::now().to_rfc3339();
                let mut new_expense_db: NewExpenseDB = new_expense.into();
                new_expense_db.id = Some(Uuid::new_v4().to_string());
                new_expense_db.created_at = Some(now.clone());
                new_expense_db.updated_at = Some(now);

                let result_db = diesel::insert_into(expenses::table)
                    .values(&new_expense_db)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(result_db))
            })
            .await
    }

    async fn update_expense(&self, expense_update: ExpenseUpdate) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = Utc::now().to_rfc3339();
                diesel::update(expenses::table.find(&expense_update.id))
                    .set((
                        expenses::description.eq(&expense_update.description),
                        expenses::amount.eq(expense_update.amount.to_string()),
                        expenses::receipt_url.eq(&expense_update.receipt_url),
                        expenses::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = expenses::table
                    .find(&expense_update.id)
                    .first::<ExpenseDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(result_db))
            })
            .await
    }

    async fn approve_expense(&self, expense_id: String) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = Utc::now().to_rfc3339();
                diesel::update(expenses::table.find(&expense_id))
                    .set((
                        expenses::approved.eq(true),
                        expenses::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = expenses::table
                    .find(&expense_id)
                    .first::<ExpenseDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(result_db))
            })
            .await
    }

    async fn delete_expense(&self, expense_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(expenses::table.find(expense_id_to_delete))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}
