use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use kasfolio_core::journal::{JournalEntry, JournalEntryUpdate, NewJournalEntry};

async fn list_entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<JournalEntry>>> {
    let entries = state.journal_service.get_entries()?;
    Ok(Json(entries))
}

async fn get_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JournalEntry>> {
    let entry = state.journal_service.get_entry(&id)?;
    Ok(Json(entry))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewJournalEntry>,
) -> ApiResult<Json<JournalEntry>> {
    let e = state.journal_service.create_entry(entry).await?;
    Ok(Json(e))
}

async fn update_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut entry): Json<JournalEntryUpdate>,
) -> ApiResult<Json<JournalEntry>> {
    entry.id = id;
    let e = state.journal_service.update_entry(entry).await?;
    Ok(Json(e))
}

async fn delete_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.journal_service.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/journal", get(list_entries).post(create_entry))
        .route(
            "/journal/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}
