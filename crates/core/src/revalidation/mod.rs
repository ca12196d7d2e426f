//! Server-side revalidation trigger.
//!
//! Best-effort side channel run after a financial mutation has durably
//! committed: touch the budget row's `updated_at`, mark the dependent view
//! paths stale, and optionally record an audit row. Failures here are logged
//! and absorbed; the primary mutation's success is never retracted by a
//! failing side effect.

mod outcome;
mod revalidation_model;
mod revalidation_service;
mod revalidation_traits;


pub use outcome::BestEffortOutcome;
pub use revalidation_model::NewUsageRecord;
pub use revalidation_service::{NoOpRevalidationService, RevalidationService};
pub use revalidation_traits::{
    RevalidationRepositoryTrait, RevalidationServiceTrait, ViewInvalidator,
};
