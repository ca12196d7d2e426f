use std::sync::Arc;

use crate::{config::Config, events::EventBus, update_stream, view_cache::ViewCache};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use kasfolio_core::{
    allocations::{AllocationService, AllocationServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    events::{BudgetSubscription, BudgetUpdateBus},
    expenses::{ExpenseService, ExpenseServiceTrait},
    journal::{JournalService, JournalServiceTrait},
    revalidation::RevalidationService,
};
use kasfolio_storage_sqlite::{
    allocations::AllocationRepository,
    budgets::BudgetRepository,
    db::{self, write_actor},
    expenses::ExpenseRepository,
    journal::JournalRepository,
    revalidation::RevalidationRepository,
};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub allocation_service: Arc<dyn AllocationServiceTrait + Send + Sync>,
    pub journal_service: Arc<dyn JournalServiceTrait + Send + Sync>,
    /// Update bus mutation handlers emit on after a commit.
    pub update_bus: Arc<BudgetUpdateBus>,
    /// Staleness registry the revalidation trigger writes into.
    pub view_cache: Arc<ViewCache>,
    pub event_bus: EventBus,
    pub db_path: String,
    /// Bus subscription of the SSE bridge; held so the bridge stays
    /// registered for the lifetime of the state.
    #[allow(dead_code)]
    pub update_stream: BudgetSubscription,
}

pub fn init_tracing() {
    let log_format = std::env::var("KF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // Ensure DATABASE_URL aligns with KF_DB_PATH so storage picks the right file
    std::env::set_var("DATABASE_URL", &config.db_path);
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let view_cache = Arc::new(ViewCache::new());
    let revalidation_repo = Arc::new(RevalidationRepository::new(pool.clone(), writer.clone()));
    let revalidation_service = Arc::new(RevalidationService::new(
        revalidation_repo,
        view_cache.clone(),
    ));

    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let budget_service: Arc<dyn BudgetServiceTrait + Send + Sync> =
        Arc::new(BudgetService::new(budget_repo));

    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync> = Arc::new(
        ExpenseService::new(expense_repo).with_revalidation(revalidation_service.clone()),
    );

    let allocation_repo = Arc::new(AllocationRepository::new(pool.clone(), writer.clone()));
    let allocation_service: Arc<dyn AllocationServiceTrait + Send + Sync> = Arc::new(
        AllocationService::new(allocation_repo).with_revalidation(revalidation_service.clone()),
    );

    let journal_repo = Arc::new(JournalRepository::new(pool.clone(), writer.clone()));
    let journal_service: Arc<dyn JournalServiceTrait + Send + Sync> =
        Arc::new(JournalService::new(journal_repo));

    let update_bus = Arc::new(BudgetUpdateBus::new());
    let event_bus = EventBus::new(256);
    let update_stream = update_stream::spawn_update_stream(&update_bus, event_bus.clone());

    Ok(Arc::new(AppState {
        budget_service,
        expense_service,
        allocation_service,
        journal_service,
        update_bus,
        view_cache,
        event_bus,
        db_path,
        update_stream,
    }))
}
