// ABOUTME: Integration tests for progress charts
// ABOUTME: Aggregation of completed rounds, client isolation, date windows, and exercise history lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_exercise, TestGym};
use gymtrack_server::models::{Exercise, User};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

/// Trainer records a session for `client` on `date` with one logged round per weight
async fn log_session(env: &TestGym, client: &User, exercise: &Exercise, date: &str, weights: &[f64]) {
    let trainer = env.token(&env.trainer);

    let workout: Value = AxumTestRequest::post("/api/workouts")
        .bearer(&trainer)
        .json(&json!({ "client_id": client.id, "date": date }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let set: Value = AxumTestRequest::post(&format!("/api/workouts/{}/sets", workout["id"].as_str().unwrap()))
        .bearer(&trainer)
        .send(env.router())
        .await
        .json();
    let rounds: Vec<Value> = AxumTestRequest::post(&format!("/api/sets/{}/exercises", set["id"].as_str().unwrap()))
        .bearer(&trainer)
        .json(&json!({ "exercise_id": exercise.id, "rounds": weights.len() + 1, "target_reps": 8 }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    // The extra round stays unlogged and must not count
    for (round, weight) in rounds.iter().zip(weights) {
        AxumTestRequest::put(&format!("/api/set-exercises/{}", round["id"].as_str().unwrap()))
            .bearer(&trainer)
            .json(&json!({ "actual_reps": 8, "actual_weight": weight, "completed": true }))
            .send(env.router())
            .await
            .assert_status(StatusCode::OK);
    }
}

#[tokio::test]
async fn test_progress_aggregates_completed_rounds() {
    let env = TestGym::new().await.unwrap();
    let bench = create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();
    log_session(&env, &env.client, &bench, "2025-03-01", &[60.0, 70.0]).await;
    log_session(&env, &env.client, &bench, "2025-03-08", &[75.0]).await;

    let points: Vec<Value> = AxumTestRequest::get(&format!("/api/progress?exercise_id={}", bench.id))
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2025-03-01");
    assert_eq!(points[0]["avg_weight"], 65.0);
    assert_eq!(points[0]["max_weight"], 70.0);
    assert_eq!(points[0]["total_reps"], 16);
    assert_eq!(points[0]["sets"], 2);
    assert_eq!(points[1]["max_weight"], 75.0);
}

#[tokio::test]
async fn test_client_only_sees_own_progress() {
    let env = TestGym::new().await.unwrap();
    let bench = create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();
    log_session(&env, &env.client, &bench, "2025-03-01", &[60.0]).await;
    log_session(&env, &env.other_client, &bench, "2025-03-01", &[90.0]).await;

    // A client asking for someone else still gets their own data
    let points: Vec<Value> = AxumTestRequest::get(&format!(
        "/api/progress?exercise_id={}&client_id={}",
        bench.id, env.other_client.id
    ))
    .bearer(&env.token(&env.client))
    .send(env.router())
    .await
    .json();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["client_id"], env.client.id.to_string());

    // Staff without a filter see one point per client and day
    let points: Vec<Value> = AxumTestRequest::get(&format!("/api/progress?exercise_id={}", bench.id))
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .json();
    assert_eq!(points.len(), 2);
}

#[tokio::test]
async fn test_date_window_and_validation() {
    let env = TestGym::new().await.unwrap();
    let bench = create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();
    log_session(&env, &env.client, &bench, "2025-01-10", &[50.0]).await;
    log_session(&env, &env.client, &bench, "2025-02-10", &[55.0]).await;
    let token = env.token(&env.trainer);

    let points: Vec<Value> = AxumTestRequest::get(&format!(
        "/api/progress?exercise_id={}&start=2025-02-01&end=2025-02-28",
        bench.id
    ))
    .bearer(&token)
    .send(env.router())
    .await
    .json();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["date"], "2025-02-10");

    // An inverted window matches nothing
    let points: Vec<Value> = AxumTestRequest::get(&format!(
        "/api/progress?exercise_id={}&start=2025-03-01&end=2025-02-01",
        bench.id
    ))
    .bearer(&token)
    .send(env.router())
    .await
    .assert_status(StatusCode::OK)
    .json();
    assert!(points.is_empty());

    let code = AxumTestRequest::get(&format!("/api/progress?exercise_id={}&start=March", bench.id))
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "INVALID_INPUT");

    let code = AxumTestRequest::get("/api/progress")
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_exercises_with_history_and_client_list() {
    let env = TestGym::new().await.unwrap();
    let bench = create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();
    create_exercise(env.db(), &env.gym, "Never Logged").await.unwrap();
    log_session(&env, &env.client, &bench, "2025-03-01", &[60.0]).await;

    let exercises: Vec<Value> = AxumTestRequest::get("/api/progress/exercises")
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["name"], "Bench Press");

    let none: Vec<Value> = AxumTestRequest::get("/api/progress/exercises")
        .bearer(&env.token(&env.other_client))
        .send(env.router())
        .await
        .json();
    assert!(none.is_empty());

    let clients: Vec<Value> = AxumTestRequest::get("/api/progress/clients")
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(clients.len(), 2);
}
