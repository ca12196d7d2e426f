//! Budgets domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for a budget: an allocation envelope for one period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub period_start: String,
    pub period_end: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new budget
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub name: String,
    pub amount: Decimal,
    pub period_start: String,
    pub period_end: String,
}

/// Input model for updating an existing budget
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub period_start: String,
    pub period_end: String,
}

/// Per-budget aggregate figures for summary views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub budget_id: String,
    pub name: String,
    pub allocated: Decimal,
    pub additional: Decimal,
    pub spent: Decimal,
    pub approved_spent: Decimal,
    pub remaining: Decimal,
}
