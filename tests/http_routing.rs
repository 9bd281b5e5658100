//! Integration tests for the routing HTTP endpoints.
//!
//! These tests verify the HTTP layer wiring:
//! 1. Request DTOs deserialize and reach the application handlers
//! 2. Response bodies carry decisions, contexts and metrics
//! 3. Invalid input maps to 400 responses

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mode_router::adapters::http::{routing_routes, RoutingAppState};
use mode_router::adapters::{InMemoryMetricsRecorder, InMemoryUserContextStore};
use mode_router::domain::routing::RoutingEngine;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    routing_routes(RoutingAppState::new(
        Arc::new(RoutingEngine::default()),
        Arc::new(InMemoryUserContextStore::new()),
        Arc::new(InMemoryMetricsRecorder::with_capacity(10)),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

fn outcome_body(user: &str, mode: &str) -> Value {
    json!({
        "user_id": user,
        "mode": mode,
        "success": true,
        "response_time_ms": 400,
        "engagement_depth": 0.8,
        "silence_rate": 0.1,
        "fallback_triggered": false
    })
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn route_returns_decision_and_echoes_context() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/route",
        Some(json!({
            "user_id": "u-1",
            "message": "How to reset my password",
            "context": { "channel": "web" }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["selected_mode"], "hybrid");
    assert_eq!(body["decision"]["fallback_available"], true);
    assert_eq!(body["decision"]["metadata"]["analysis"]["input_type"], "practical");
    assert_eq!(body["context"], json!({ "channel": "web" }));
}

#[tokio::test]
async fn crisis_message_disables_fallback() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/route",
        Some(json!({
            "user_id": "u-2",
            "message": "I want to kill myself",
            "preference": "field"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"]["selected_mode"], "hybrid");
    assert_eq!(body["decision"]["fallback_available"], false);
    assert_eq!(body["decision"]["confidence"], 1.0);
    assert_eq!(body["decision"]["metadata"]["path"], "crisis_override");
}

#[tokio::test]
async fn route_rejects_blank_user_id() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/route",
        Some(json!({ "user_id": "   ", "message": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Outcomes and Context
// =============================================================================

#[tokio::test]
async fn outcome_updates_context() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/outcomes", Some(outcome_body("u-3", "field"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_count"], 1);
    assert_eq!(body["last_mode_used"], "field");
    assert_eq!(body["current_streak"], 1);

    let (status, body) = send(&app, Method::GET, "/api/users/u-3/context", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u-3");
    assert_eq!(body["session_count"], 1);
}

#[tokio::test]
async fn outcome_rejects_out_of_range_metrics() {
    let mut body = outcome_body("u-4", "field");
    body["engagement_depth"] = json!(1.5);

    let (status, _) = send(&app(), Method::POST, "/api/outcomes", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn outcome_rejects_unknown_mode() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/api/outcomes",
        Some(outcome_body("u-5", "quantum")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn preference_can_be_set_and_cleared() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/u-6/preference",
        Some(json!({ "mode": "field" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["preferred_mode"], "field");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/u-6/preference",
        Some(json!({ "mode": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["preferred_mode"], Value::Null);
}

#[tokio::test]
async fn delete_resets_context() {
    let app = app();
    send(&app, Method::POST, "/api/outcomes", Some(outcome_body("u-7", "hybrid"))).await;

    let (status, body) = send(&app, Method::DELETE, "/api/users/u-7/context", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_count"], 0);
    assert_eq!(body["last_mode_used"], Value::Null);
}

// =============================================================================
// Metrics
// =============================================================================

#[tokio::test]
async fn metrics_export_is_bounded_and_compared() {
    let app = app();
    for i in 0..12 {
        let mode = if i < 2 { "hybrid" } else { "field" };
        send(&app, Method::POST, "/api/outcomes", Some(outcome_body("u-8", mode))).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 10);
    assert!(records.iter().all(|r| r["mode"] == "field"));

    let (status, body) = send(&app, Method::GET, "/api/metrics/compare", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["field"]["status"], "data");
    assert_eq!(body["field"]["samples"], 10);
    assert_eq!(body["hybrid"]["status"], "no_data");
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}
