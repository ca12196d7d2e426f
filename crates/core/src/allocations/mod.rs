//! Additional allocations module - domain models, services, and traits.

mod allocations_model;
mod allocations_service;
mod allocations_traits;

#[cfg(test)]
mod allocations_service_tests;

pub use allocations_model::{BudgetAllocation, NewBudgetAllocation};
pub use allocations_service::AllocationService;
pub use allocations_traits::{AllocationRepositoryTrait, AllocationServiceTrait};
