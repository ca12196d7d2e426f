use std::sync::Arc;

use crate::{main_lib::AppState, view_cache::StaleView};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Stale paths the SSR layer should re-render.
async fn get_stale_views(State(state): State<Arc<AppState>>) -> Json<Vec<StaleView>> {
    Json(state.view_cache.snapshot())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedRequest {
    path: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedResponse {
    /// Whether the path was stale before this call.
    was_stale: bool,
}

/// Renderer callback: the path has been re-rendered, clear its mark.
async fn report_refreshed(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshedRequest>,
) -> Json<RefreshedResponse> {
    let was_stale = state.view_cache.refreshed(&body.path);
    Json(RefreshedResponse { was_stale })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/views/stale", get(get_stale_views))
        .route("/views/refreshed", post(report_refreshed))
}
