use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One audit row for the optional `budget_usage_history` table.
///
/// `recorded_at` is stamped by the storage layer at insert time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUsageRecord {
    pub budget_id: String,
    pub expense_id: String,
    pub amount: Decimal,
}
