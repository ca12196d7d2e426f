use kasfolio_core::allocations::{
    AllocationRepositoryTrait, BudgetAllocation, NewBudgetAllocation,
};
use kasfolio_core::Result;

use super::model::{BudgetAllocationDB, NewBudgetAllocationDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budget_allocations;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct AllocationRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AllocationRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        AllocationRepository { pool, writer }
    }
}

#[async_trait]
impl AllocationRepositoryTrait for AllocationRepository {
    fn load_allocations(&self) -> Result<Vec<BudgetAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let allocations_db = budget_allocations::table
            .order(budget_allocations::created_at.desc())
            .load::<BudgetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(allocations_db
            .into_iter()
            .map(BudgetAllocation::from)
            .collect())
    }

    fn load_allocations_for_budget(&self, budget_id: &str) -> Result<Vec<BudgetAllocation>> {
        let mut conn = get_connection(&self.pool)?;
        let allocations_db = budget_allocations::table
            .filter(budget_allocations::budget_id.eq(budget_id))
            .order(budget_allocations::created_at.desc())
            .load::<BudgetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(allocations_db
            .into_iter()
            .map(BudgetAllocation::from)
            .collect())
    }

    fn get_allocation_by_id(&self, allocation_id: &str) -> Result<BudgetAllocation> {
        let mut conn = get_connection(&self.pool)?;
        let allocation_db = budget_allocations::table
            .find(allocation_id)
            .first::<BudgetAllocationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(BudgetAllocation::from(allocation_db))
    }

    async fn insert_new_allocation(
        &self,
        new_allocation: NewBudgetAllocation,
    ) -> Result<BudgetAllocation> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<BudgetAllocation> {
                    let now = Utc::now().to_rfc3339();
                    let mut new_allocation_db: NewBudgetAllocationDB = new_allocation.into();
                    new_allocation_db.id = Some(Uuid::new_v4().to_string());
                    new_allocation_db.created_at = Some(now.clone());
                    new_allocation_db.updated_at = Some(now);

                    let result_db = diesel::insert_into(budget_allocations::table)
                        .values(&new_allocation_db)
                        .returning(BudgetAllocationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(BudgetAllocation::from(result_db))
                },
            )
            .await
    }

    async fn delete_allocation(&self, allocation_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    budget_allocations::table.find(allocation_id_to_delete),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
