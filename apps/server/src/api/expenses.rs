use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use kasfolio_core::expenses::{Expense, ExpenseUpdate, NewExpense};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseQuery {
    budget_id: Option<String>,
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExpenseQuery>,
) -> ApiResult<Json<Vec<Expense>>> {
    let expenses = match query.budget_id {
        Some(budget_id) => state.expense_service.get_expenses_for_budget(&budget_id)?,
        None => state.expense_service.get_expenses()?,
    };
    Ok(Json(expenses))
}

async fn get_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Expense>> {
    let expense = state.expense_service.get_expense(&id)?;
    Ok(Json(expense))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(expense): Json<NewExpense>,
) -> ApiResult<Json<Expense>> {
    let e = state.expense_service.create_expense(expense).await?;
    state.update_bus.emit(&e.budget_id, e.amount);
    Ok(Json(e))
}

async fn update_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut expense): Json<ExpenseUpdate>,
) -> ApiResult<Json<Expense>> {
    expense.id = id;
    let e = state.expense_service.update_expense(expense).await?;
    state.update_bus.emit(&e.budget_id, e.amount);
    Ok(Json(e))
}

async fn approve_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Expense>> {
    let e = state.expense_service.approve_expense(id).await?;
    state.update_bus.emit(&e.budget_id, e.amount);
    Ok(Json(e))
}

async fn delete_expense(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    // Capture the row first; after deletion there is nothing left to emit.
    let expense = state.expense_service.get_expense(&id)?;
    let _ = state.expense_service.delete_expense(id).await?;
    state.update_bus.emit(&expense.budget_id, expense.amount);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
        .route("/expenses/{id}/approve", post(approve_expense))
}
