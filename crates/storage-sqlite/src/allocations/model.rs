//! Database models for additional allocations.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetDB;

/// Database model for additional allocations
#[derive(
    Queryable,
    Identifiable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(BudgetDB, foreign_key = budget_id))]
#[diesel(table_name = crate::schema::budget_allocations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocationDB {
    pub id: String,
    pub budget_id: String,
    pub amount: String,
    pub reason: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new allocation
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budget_allocations)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetAllocationDB {
    pub id: Option<String>,
    pub budget_id: String,
    pub amount: String,
    pub reason: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Conversion to domain models
impl From<BudgetAllocationDB> for kasfolio_core::allocations::BudgetAllocation {
    fn from(db: BudgetAllocationDB) -> Self {
        Self {
            id: db.id,
            budget_id: db.budget_id,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            reason: db.reason,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<kasfolio_core::allocations::NewBudgetAllocation> for NewBudgetAllocationDB {
    fn from(domain: kasfolio_core::allocations::NewBudgetAllocation) -> Self {
        Self {
            id: domain.id,
            budget_id: domain.budget_id,
            amount: domain.amount.to_string(),
            reason: domain.reason,
            created_at: None,
            updated_at: None,
        }
    }
}
