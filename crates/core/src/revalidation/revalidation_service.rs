use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::{BestEffortOutcome, NewUsageRecord, RevalidationRepositoryTrait};
use super::{RevalidationServiceTrait, ViewInvalidator};
use crate::constants::{BUDGETS_VIEW_PATH, EXPENSES_VIEW_PATH};

/// Revalidation trigger backed by real storage and a view cache.
///
/// Runs after the primary mutation has committed; it is not transactional
/// with it. A crash between the commit and this trigger leaves the data
/// correct but the views stale until a later request revalidates them.
pub struct RevalidationService {
    repository: Arc<dyn RevalidationRepositoryTrait>,
    views: Arc<dyn ViewInvalidator>,
}

impl RevalidationService {
    pub fn new(
        repository: Arc<dyn RevalidationRepositoryTrait>,
        views: Arc<dyn ViewInvalidator>,
    ) -> Self {
        Self { repository, views }
    }
}

#[async_trait]
impl RevalidationServiceTrait for RevalidationService {
    async fn record_budget_impact(
        &self,
        budget_id: &str,
        expense_amount: Decimal,
        approved: bool,
    ) -> BestEffortOutcome {
        match self.repository.touch_budget(budget_id).await {
            Ok(rows) => {
                if rows == 0 {
                    log::warn!(
                        "Budget {} no longer exists; revalidating views anyway",
                        budget_id
                    );
                }
                self.views.mark_stale(BUDGETS_VIEW_PATH);
                self.views.mark_stale(EXPENSES_VIEW_PATH);
                log::debug!(
                    "Recorded budget impact of {} on {} (approved: {})",
                    expense_amount,
                    budget_id,
                    approved
                );
                BestEffortOutcome::Completed
            }
            Err(err) => {
                log::error!("Failed to record budget impact for {}: {}", budget_id, err);
                BestEffortOutcome::Failed
            }
        }
    }

    async fn track_usage(
        &self,
        budget_id: &str,
        expense_amount: Decimal,
        expense_id: &str,
    ) -> BestEffortOutcome {
        let exists = match self.repository.usage_table_exists() {
            Ok(exists) => exists,
            Err(err) => {
                log::warn!("Could not check for usage history table: {}", err);
                return BestEffortOutcome::Failed;
            }
        };
        if !exists {
            log::debug!(
                "Usage history table not provisioned; skipping audit row for expense {}",
                expense_id
            );
            return BestEffortOutcome::Skipped;
        }

        let record = NewUsageRecord {
            budget_id: budget_id.to_string(),
            expense_id: expense_id.to_string(),
            amount: expense_amount,
        };
        match self.repository.insert_usage_record(record).await {
            Ok(_) => BestEffortOutcome::Completed,
            Err(err) => {
                log::warn!(
                    "Failed to record usage history for expense {}: {}",
                    expense_id,
                    err
                );
                BestEffortOutcome::Failed
            }
        }
    }
}

/// No-op implementation for tests or contexts without storage-backed views.
#[derive(Clone, Default)]
pub struct NoOpRevalidationService;

#[async_trait]
impl RevalidationServiceTrait for NoOpRevalidationService {
    async fn record_budget_impact(
        &self,
        _budget_id: &str,
        _expense_amount: Decimal,
        _approved: bool,
    ) -> BestEffortOutcome {
        BestEffortOutcome::Skipped
    }

    async fn track_usage(
        &self,
        _budget_id: &str,
        _expense_amount: Decimal,
        _expense_id: &str,
    ) -> BestEffortOutcome {
        BestEffortOutcome::Skipped
    }
}
