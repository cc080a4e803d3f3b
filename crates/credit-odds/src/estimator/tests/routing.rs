use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::estimator::router::estimator_router;

fn router() -> axum::Router {
    let (service, _) = build_service();
    estimator_router(Arc::new(service))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn products_route_lists_the_catalogue() {
    let response = router()
        .oneshot(Request::get("/api/v1/products").body(Body::empty()).unwrap())
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let products = payload.as_array().expect("array payload");
    assert_eq!(products.len(), 4);
    assert_eq!(products[0]["key"], "credit-card");
    assert_eq!(products[0]["max_points"], 120);
    assert_eq!(products[1]["factor_count"], 10);
}

#[tokio::test]
async fn factors_route_falls_back_to_credit_card() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/products/boat-loan/factors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["product"], "credit-card");
    assert_eq!(payload["factors"][2]["key"], "monthlyIncome");
    assert_eq!(payload["factors"][0]["options"][2]["value"], "22-35");
}

#[tokio::test]
async fn estimate_route_scores_answers_and_reports_ignored_keys() {
    let request = post_json(
        "/api/v1/estimates",
        json!({
            "product": "credit-card",
            "answers": {
                "age": "22-35",
                "employment": "public",
                "monthlyIncome": "100000+",
                "creditHistory": "excellent",
                "existingCreditLimit": "none",
                "monthlyLoanRepayment": "none",
                "savings": "500000+",
                "dti": "<30",
                "favouriteColour": "green"
            }
        }),
    );

    let response = router().oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["percentage"], 99);
    assert_eq!(payload["tier"], "excellent");
    assert_eq!(payload["outcome"]["status"]["kind"], "complete");
    assert_eq!(payload["ignored_answers"], json!(["favouriteColour"]));
}

#[tokio::test]
async fn estimate_route_flags_incomplete_input() {
    let request = post_json(
        "/api/v1/estimates",
        json!({ "product": "home-loan", "answers": { "age": "22-35" } }),
    );

    let response = router().oneshot(request).await.expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["outcome"]["status"]["kind"], "incomplete");
    assert_eq!(payload["tier"], "low");
    assert!(payload.get("ignored_answers").is_none());
}

#[tokio::test]
async fn session_routes_drive_the_questionnaire() {
    let router = router();

    let response = router
        .clone()
        .oneshot(post_json("/api/v1/sessions", json!({ "product": "credit-card" })))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let id = payload["session_id"].as_str().expect("id present").to_string();
    assert_eq!(payload["current_factor"]["key"], "age");

    let response = router
        .clone()
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/next")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/answer"),
            json!({ "value": "not-an-age" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/answer"),
            json!({ "value": "22-35" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["can_advance"], true);
    assert_eq!(payload["current_factor"]["selected"], "22-35");

    let response = router
        .clone()
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/next")))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["progress"]["step"], 2);
    assert_eq!(payload["current_factor"]["key"], "employment");

    let response = router
        .clone()
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/restart")))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["state"], "product_selection");
    assert_eq!(payload["answers"], json!({}));

    let response = router
        .oneshot(
            Request::delete(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn session_can_be_created_without_a_body() {
    let response = router()
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["state"], "product_selection");
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/sessions/qs-404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().unwrap().contains("not found"));
}
