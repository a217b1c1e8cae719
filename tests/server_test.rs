// ABOUTME: Integration tests for the assembled router
// ABOUTME: Health probes, request ids, the JSON 404 fallback, and the role-specific home page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_server_resources, TestGym};
use gymtrack_server::server::build_router;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_ready() {
    let resources = create_test_server_resources().await.unwrap();

    let body: Value = AxumTestRequest::get("/health")
        .send(build_router(resources.clone()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "healthy");

    AxumTestRequest::get("/ready")
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_generated_or_propagated() {
    let resources = create_test_server_resources().await.unwrap();

    let response = AxumTestRequest::get("/health")
        .send(build_router(resources.clone()))
        .await;
    assert!(response.header("x-request-id").is_some());
    assert_eq!(response.header("x-content-type-options").as_deref(), Some("nosniff"));

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "abc-123")
        .send(build_router(resources))
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let resources = create_test_server_resources().await.unwrap();
    let code = AxumTestRequest::get("/api/nope")
        .send(build_router(resources))
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .error_code();
    assert_eq!(code, "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_home_differs_by_role() {
    let env = TestGym::new().await.unwrap();

    let staff: Value = AxumTestRequest::get("/api/home")
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(staff["view"], "staff");
    assert_eq!(staff["clients"].as_array().unwrap().len(), 2);

    AxumTestRequest::post("/api/workouts")
        .bearer(&env.token(&env.trainer))
        .json(&json!({ "client_id": env.client.id, "date": "2999-01-01" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED);

    let client: Value = AxumTestRequest::get("/api/home")
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(client["view"], "client");
    assert_eq!(client["upcoming"].as_array().unwrap().len(), 1);
    assert!(client["past"].as_array().unwrap().is_empty());
}
