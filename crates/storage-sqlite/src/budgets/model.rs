//! Database models for budgets.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database model for budgets. Amounts are stored as text.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BudgetDB {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub period_start: String,
    pub period_end: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new budget
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetDB {
    pub id: Option<String>,
    pub name: String,
    pub amount: String,
    pub period_start: String,
    pub period_end: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Conversion to domain models
impl From<BudgetDB> for kasfolio_core::budgets::Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            period_start: db.period_start,
            period_end: db.period_end,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<kasfolio_core::budgets::NewBudget> for NewBudgetDB {
    fn from(domain: kasfolio_core::budgets::NewBudget) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            amount: domain.amount.to_string(),
            period_start: domain.period_start,
            period_end: domain.period_end,
            created_at: None,
            updated_at: None,
        }
    }
}
