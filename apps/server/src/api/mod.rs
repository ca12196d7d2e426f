use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{config::Config, main_lib::AppState};

mod allocations;
mod budgets;
mod events;
mod expenses;
mod health;
mod journal;
mod views;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let v1 = Router::new()
        .merge(budgets::router())
        .merge(expenses::router())
        .merge(allocations::router())
        .merge(journal::router())
        .merge(views::router())
        .merge(events::router())
        .merge(health::router());

    let mut router = Router::new()
        .nest("/api/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_millis(
            config.request_timeout_ms,
        )))
        .with_state(state);

    if !config.cors_allow_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .cors_allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }
    router
}
