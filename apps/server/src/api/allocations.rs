use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use kasfolio_core::allocations::{BudgetAllocation, NewBudgetAllocation};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocationQuery {
    budget_id: Option<String>,
}

async fn list_allocations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AllocationQuery>,
) -> ApiResult<Json<Vec<BudgetAllocation>>> {
    let allocations = match query.budget_id {
        Some(budget_id) => state
            .allocation_service
            .get_allocations_for_budget(&budget_id)?,
        None => state.allocation_service.get_allocations()?,
    };
    Ok(Json(allocations))
}

async fn create_allocation(
    State(state): State<Arc<AppState>>,
    Json(allocation): Json<NewBudgetAllocation>,
) -> ApiResult<Json<BudgetAllocation>> {
    let a = state.allocation_service.create_allocation(allocation).await?;
    Ok(Json(a))
}

async fn delete_allocation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.allocation_service.delete_allocation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/allocations",
            get(list_allocations).post(create_allocation),
        )
        .route("/allocations/{id}", delete(delete_allocation))
}
