use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{BestEffortOutcome, NewUsageRecord};
use crate::errors::Result;

/// Storage operations the revalidation trigger depends on.
#[async_trait]
pub trait RevalidationRepositoryTrait: Send + Sync {
    /// Sets the budget row's `updated_at` to the storage clock's now.
    ///
    /// Returns the number of rows touched; zero means the budget no longer
    /// exists, which is not an error.
    async fn touch_budget(&self, budget_id: &str) -> Result<usize>;

    /// Whether the optional `budget_usage_history` table is provisioned.
    fn usage_table_exists(&self) -> Result<bool>;

    /// Inserts one audit row. Only called when the table exists.
    async fn insert_usage_record(&self, record: NewUsageRecord) -> Result<usize>;
}

/// Marks cached server-rendered views stale so the next request re-fetches.
///
/// Marking is idempotent in effect: any number of marks leaves the path
/// stale until its renderer refreshes it.
pub trait ViewInvalidator: Send + Sync {
    fn mark_stale(&self, path: &str);
}

/// Best-effort trigger run after a financial mutation commits.
///
/// Neither operation ever returns an error or panics toward the caller;
/// failures surface only through [`BestEffortOutcome`].
#[async_trait]
pub trait RevalidationServiceTrait: Send + Sync {
    /// Touches the budget's modification timestamp and marks the budgets and
    /// expenses views stale. `approved` records whether the triggering
    /// mutation was an approved expense; it is carried for log context.
    async fn record_budget_impact(
        &self,
        budget_id: &str,
        expense_amount: Decimal,
        approved: bool,
    ) -> BestEffortOutcome;

    /// Records one usage row in the optional audit table. A missing table is
    /// a successful no-op, so schemas can be provisioned independently of
    /// deploys.
    async fn track_usage(
        &self,
        budget_id: &str,
        expense_amount: Decimal,
        expense_id: &str,
    ) -> BestEffortOutcome;
}
