//! Database models for expenses.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetDB;

/// Database model for expenses
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
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDB {
    pub id: String,
    pub budget_id: String,
    pub description: String,
    pub amount: String,
    pub receipt_url: Option<String>,
    pub approved: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for creating a new expense
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseDB {
    pub id: Option<String>,
    pub budget_id: String,
    pub description: String,
    pub amount: String,
    pub receipt_url: Option<String>,
    pub approved: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// Conversion to domain models
impl From<ExpenseDB> for kasfolio_core::expenses::Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            id: db.id,
            budget_id: db.budget_id,
            description: db.description,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            receipt_url: db.receipt_url,
            approved: db.approved,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<kasfolio_core::expenses::NewExpense> for NewExpenseDB {
    fn from(domain: kasfolio_core::expenses::NewExpense) -> Self {
        Self {
            id: domain.id,
            budget_id: domain.budget_id,
            description: domain.description,
            amount: domain.amount.to_string(),
            receipt_url: domain.receipt_url,
            approved: false,
            created_at: None,
            updated_at: None,
        }
    }
}
