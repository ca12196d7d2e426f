use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness: the process is up and storage answers a read.
async fn readyz(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    match state.budget_service.get_budgets() {
        Ok(_) => Ok(Json(json!({ "status": "ready" }))),
        Err(err) => {
            tracing::error!("Readiness probe failed: {}", err);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
