use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use kasfolio_core::budgets::{Budget, BudgetSummary, BudgetUpdate, NewBudget};
use kasfolio_core::currency::format_rupiah;
use kasfolio_core::events::BudgetUpdateEvent;

async fn list_budgets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Budget>>> {
    let budgets = state.budget_service.get_budgets()?;
    Ok(Json(budgets))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Budget>> {
    let budget = state.budget_service.get_budget(&id)?;
    Ok(Json(budget))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(budget): Json<NewBudget>,
) -> ApiResult<Json<Budget>> {
    let b = state.budget_service.create_budget(budget).await?;
    Ok(Json(b))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut budget): Json<BudgetUpdate>,
) -> ApiResult<Json<Budget>> {
    // The path segment is authoritative over whatever id the body carries.
    budget.id = id;
    let b = state.budget_service.update_budget(budget).await?;
    Ok(Json(b))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.budget_service.delete_budget(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Summary figures plus display strings so list rows need no client-side
/// currency formatting.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetSummaryResponse {
    #[serde(flatten)]
    summary: BudgetSummary,
    spent_display: String,
    remaining_display: String,
}

async fn get_budget_summary(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSummaryResponse>> {
    let summary = state.budget_service.get_budget_summary(&id)?;
    let spent_display = format_rupiah(summary.spent);
    let remaining_display = format_rupiah(summary.remaining);
    Ok(Json(BudgetSummaryResponse {
        summary,
        spent_display,
        remaining_display,
    }))
}

/// Most recent update seen by the bus, or `null` before any emission.
async fn latest_budget_activity(
    State(state): State<Arc<AppState>>,
) -> Json<Option<BudgetUpdateEvent>> {
    Json(state.update_bus.get_latest())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/activity/latest", get(latest_budget_activity))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route("/budgets/{id}/summary", get(get_budget_summary))
}
