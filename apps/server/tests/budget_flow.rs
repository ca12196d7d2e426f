use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

use kasfolio_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().expect("Failed to create temp dir");
    std::env::set_var("KF_DB_PATH", tmp.path().join("kasfolio-test.db"));
    let config = Config::from_env();
    let state = build_state(&config).await.expect("Failed to build state");
    // The TempDir must outlive the router; the pool reopens the file lazily.
    (app_router(state, &config), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn expense_flow_revalidates_views_and_reports_latest_activity() {
    let (app, _db_dir) = build_test_router().await;

    let (status, budget) = send(
        &app,
        Method::POST,
        "/api/v1/budgets",
        Some(json!({
            "name": "Operasional Kantor",
            "amount": 5000000,
            "periodStart": "2026-01-01",
            "periodEnd": "2026-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let budget_id = budget["id"].as_str().unwrap().to_string();

    // Nothing emitted and nothing stale before the first financial mutation
    let (status, latest) = send(&app, Method::GET, "/api/v1/budgets/activity/latest", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(latest.is_null());
    let (_, stale) = send(&app, Method::GET, "/api/v1/views/stale", None).await;
    assert_eq!(stale.as_array().unwrap().len(), 0);

    let (status, expense) = send(
        &app,
        Method::POST,
        "/api/v1/expenses",
        Some(json!({
            "budgetId": budget_id,
            "description": "Sewa ruang rapat",
            "amount": 250000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expense["approved"], false);
    let expense_id = expense["id"].as_str().unwrap().to_string();

    // The revalidation trigger marked both admin views stale
    let (_, stale) = send(&app, Method::GET, "/api/v1/views/stale", None).await;
    let paths: Vec<&str> = stale
        .as_array()
        .unwrap()
        .iter()
        .map(|view| view["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["/anggaran", "/pengeluaran"]);

    // The mutation handler emitted on the update bus
    let (_, latest) = send(&app, Method::GET, "/api/v1/budgets/activity/latest", None).await;
    assert_eq!(latest["budgetId"], budget_id.as_str());
    assert_eq!(latest["expenseAmount"], 250000.0);

    let (status, summary) = send(
        &app,
        Method::GET,
        &format!("/api/v1/budgets/{budget_id}/summary"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["allocated"], 5000000.0);
    assert_eq!(summary["spent"], 250000.0);
    assert_eq!(summary["approvedSpent"], 0.0);
    assert_eq!(summary["remaining"], 4750000.0);
    assert_eq!(summary["spentDisplay"], "Rp250.000");
    assert_eq!(summary["remainingDisplay"], "Rp4.750.000");

    // The renderer refreshes one path; the other stays stale
    let (_, refreshed) = send(
        &app,
        Method::POST,
        "/api/v1/views/refreshed",
        Some(json!({ "path": "/anggaran" })),
    )
    .await;
    assert_eq!(refreshed["wasStale"], true);
    let (_, stale) = send(&app, Method::GET, "/api/v1/views/stale", None).await;
    assert_eq!(stale.as_array().unwrap().len(), 1);
    assert_eq!(stale[0]["path"], "/pengeluaran");

    // Approval flips the flag, revalidates, and emits again
    let (status, approved) = send(
        &app,
        Method::POST,
        &format!("/api/v1/expenses/{expense_id}/approve"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["approved"], true);

    let (_, summary) = send(
        &app,
        Method::GET,
        &format!("/api/v1/budgets/{budget_id}/summary"),
        None,
    )
    .await;
    assert_eq!(summary["approvedSpent"], 250000.0);

    let (_, stale) = send(&app, Method::GET, "/api/v1/views/stale", None).await;
    assert_eq!(stale.as_array().unwrap().len(), 2);

    // Input the service rejects reaches neither storage nor the bus
    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/expenses",
        Some(json!({
            "budgetId": budget_id,
            "description": "Jumlah salah",
            "amount": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "invalid_input");
    let (_, latest) = send(&app, Method::GET, "/api/v1/budgets/activity/latest", None).await;
    assert_eq!(latest["expenseAmount"], 250000.0);

    let (status, _) = send(&app, Method::GET, "/api/v1/budgets/tidak-ada", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/api/v1/readyz", None).await;
    assert_eq!(status, StatusCode::OK);

    std::env::remove_var("KF_DB_PATH");
}
