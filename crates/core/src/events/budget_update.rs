//! Budget update event payload.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fact announced after a financial mutation touches a budget.
///
/// Created exactly once per observed mutation by the emitting call site,
/// copied into each subscriber. Never persisted; it lives only as long as
/// delivery takes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdateEvent {
    /// Budget the mutation landed on.
    pub budget_id: String,
    /// Amount of the expense that caused the update, in rupiah.
    pub expense_amount: Decimal,
    /// Emission time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl BudgetUpdateEvent {
    /// Creates an event stamped with the current wall-clock time.
    pub fn new(budget_id: impl Into<String>, expense_amount: Decimal) -> Self {
        Self {
            budget_id: budget_id.into(),
            expense_amount,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
