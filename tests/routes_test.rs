// ABOUTME: HTTP route tests for plan, image and health endpoints
// ABOUTME: Drives the assembled router with tower oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{
    fenced_plan, sample_profile, service_with, service_with_images, InlineImageProvider,
    ScriptedLlm,
};
use fitplan_server::images::ImageProvider;
use fitplan_server::llm::LlmProvider;
use fitplan_server::routes::app_router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(provider: Option<Arc<dyn LlmProvider>>) -> Router {
    app_router(Arc::new(service_with(provider)))
}

async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Plan
// ============================================================================

#[tokio::test]
async fn test_generate_plan_returns_normalized_plan() {
    let app = router(Some(ScriptedLlm::replying(fenced_plan()) as Arc<dyn LlmProvider>));
    let body = serde_json::to_string(&sample_profile()).unwrap();

    let (status, plan) = post_json(app, "/api/generate-plan", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["workout"]["dailyRoutines"].as_array().unwrap().len(), 3);
    assert_eq!(plan["diet"]["meals"]["snacks"], "Almonds, protein shake");
    assert_eq!(plan["motivation"], "Strong today, stronger tomorrow.");
}

#[tokio::test]
async fn test_generate_plan_without_credential_is_server_error() {
    let app = router(None);
    let body = serde_json::to_string(&sample_profile()).unwrap();

    let (status, error) = post_json(app, "/api/generate-plan", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"]["code"], "CONFIG_MISSING");
}

#[tokio::test]
async fn test_generate_plan_rejects_incomplete_profile() {
    let app = router(Some(ScriptedLlm::replying(fenced_plan()) as Arc<dyn LlmProvider>));
    let mut profile = serde_json::to_value(sample_profile()).unwrap();
    profile["age"] = json!("");

    let (status, error) = post_json(app, "/api/generate-plan", profile.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_generate_plan_rejects_malformed_body() {
    let app = router(None);

    let (status, error) = post_json(app, "/api/generate-plan", "{not json".to_owned()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unrecoverable_output_is_unprocessable() {
    let app = router(Some(ScriptedLlm::replying("no plan here") as Arc<dyn LlmProvider>));
    let body = serde_json::to_string(&sample_profile()).unwrap();

    let (status, error) = post_json(app, "/api/generate-plan", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"]["code"], "PLAN_SCHEMA_VIOLATION");
}

// ============================================================================
// Images
// ============================================================================

#[tokio::test]
async fn test_generate_image_falls_back_with_note() {
    let app = router(None);
    let body = json!({"prompt": "Pushup", "type": "exercise"}).to_string();

    let (status, image) = post_json(app, "/api/generate-image", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(image["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://image.pollinations.ai/prompt/realistic%20professional%20fitness%20photo%20of%20Pushup%20"));
    assert_eq!(
        image["note"],
        "Used fallback image provider because Gemini key is missing."
    );
}

#[tokio::test]
async fn test_repeated_image_requests_hit_the_cache() {
    let primary = InlineImageProvider::new();
    let app = app_router(Arc::new(service_with_images(
        primary.clone() as Arc<dyn ImageProvider>
    )));
    let body = json!({"prompt": "Squat", "type": "exercise"}).to_string();

    let (first_status, first) = post_json(app.clone(), "/api/generate-image", body.clone()).await;
    let (second_status, second) = post_json(app, "/api/generate-image", body).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first["imageUrl"], "data:image/png;base64,aGVsbG8=");
    assert_eq!(first, second);
    assert_eq!(primary.calls(), 1);
}

#[tokio::test]
async fn test_cached_fallback_keeps_its_note() {
    let app = router(None);
    let body = json!({"prompt": "Oatmeal", "type": "food"}).to_string();

    let (_, first) = post_json(app.clone(), "/api/generate-image", body.clone()).await;
    let (_, second) = post_json(app, "/api/generate-image", body).await;

    assert_eq!(
        second["note"],
        "Used fallback image provider because Gemini key is missing."
    );
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_generate_image_requires_prompt_and_type() {
    for body in [
        json!({"type": "food"}).to_string(),
        json!({"prompt": "  ", "type": "food"}).to_string(),
        json!({"prompt": "Salad"}).to_string(),
        "garbage".to_owned(),
    ] {
        let (status, error) = post_json(router(None), "/api/generate-image", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Missing prompt or type in request body");
    }
}

#[tokio::test]
async fn test_generate_image_rejects_unknown_type() {
    let body = json!({"prompt": "Salad", "type": "drink"}).to_string();

    let (status, error) = post_json(router(None), "/api/generate-image", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["error"],
        "Unknown image type 'drink', expected 'exercise' or 'food'"
    );
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_capabilities() {
    let app = router(None);
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["plan_generation"], false);
    assert_eq!(health["primary_images"], false);
}
