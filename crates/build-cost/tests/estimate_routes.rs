use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use build_cost::estimator::CostTables;
use build_cost::quote::quote_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    quote_router(Arc::new(CostTables::standard()))
}

async fn post_estimate(payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/estimates")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds");

    let response = router().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collected");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn estimate_route_prices_a_cash_purchase() {
    let (status, body) = post_estimate(json!({
        "contact": { "name": "Rafael", "email": "rafael@example.com" },
        "project": { "region": "DF", "area": 100, "amenities": { "garage": false } },
        "plan": { "mode": "cash" }
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let total = body["breakdown"]["total"].as_f64().expect("total present");
    assert!((total - 231_000.0).abs() < 1e-6);
    let final_value = body["payment"]["final_value"].as_f64().expect("final value");
    assert!((final_value - total * 0.95).abs() < 1e-6);
    assert!(body.get("schedule").is_none());
}

#[tokio::test]
async fn estimate_route_prices_only_the_named_amenities() {
    let (status, body) = post_estimate(json!({
        "contact": { "name": "Rafael", "email": "rafael@example.com" },
        "project": { "region": "DF", "area": 100, "amenities": { "pool": true } }
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let lines = body["breakdown"]["amenities"].as_array().expect("amenity lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["amenity"], "pool");
    let total = body["breakdown"]["total"].as_f64().expect("total present");
    assert!((total - 258_720.0).abs() < 1e-6);
}

#[tokio::test]
async fn estimate_route_reports_missing_fields() {
    let (status, body) = post_estimate(json!({ "project": { "region": "DF" } })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing_fields"], json!(["name", "email", "area"]));
}

#[tokio::test]
async fn estimate_route_rejects_unknown_region() {
    let (status, body) = post_estimate(json!({
        "contact": { "name": "Rafael", "email": "rafael@example.com" },
        "project": { "region": "ZZ", "area": 100 }
    }))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("region"));
}

#[tokio::test]
async fn estimate_route_refuses_unbounded_schedules() {
    let (status, body) = post_estimate(json!({
        "contact": { "name": "Rafael", "email": "rafael@example.com" },
        "project": { "region": "DF", "area": 100 },
        "plan": { "mode": "installment", "installment_count": 4_294_967_295u64 },
        "include_schedule": true
    }))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("installment_count"));
}

#[tokio::test]
async fn catalog_route_lists_payment_options() {
    let request = Request::builder()
        .uri("/api/v1/catalog")
        .body(Body::empty())
        .expect("request builds");
    let response = router().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collected");
    let body: Value = serde_json::from_slice(&bytes).expect("catalog json");
    assert_eq!(
        body["payment"]["installment_counts"],
        json!([6, 12, 18, 24, 36, 48])
    );
}
