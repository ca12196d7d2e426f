//! Additional-allocation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for a mid-period top-up that raises a budget's envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    pub id: String,
    pub budget_id: String,
    pub amount: Decimal,
    pub reason: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Input model for creating a new allocation
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetAllocation {
    pub id: Option<String>,
    pub budget_id: String,
    pub amount: Decimal,
    pub reason: String,
}
