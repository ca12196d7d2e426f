//! Expenses domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for an expense recorded against a budget.
/// Receipt images live in external blob storage; only the URL is kept here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub budget_id: String,
    pub description: String,
    pub amount: Decimal,
    pub receipt_url: Option<String>,
    pub approved: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new expense. Expenses start unapproved.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub budget_id: String,
    pub description: String,
    pub amount: Decimal,
    pub receipt_url: Option<String>,
}

/// Input model for updating an existing expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub receipt_url: Option<String>,
}
