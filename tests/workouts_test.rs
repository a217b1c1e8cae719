// ABOUTME: Integration tests for the workout route handlers
// ABOUTME: Building sets and rounds, copying structure, completion locking, and client access rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_exercise, TestGym};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// Test Helpers
// ============================================================================

struct Built {
    workout_id: String,
    set_id: String,
    exercise_id: String,
    round_ids: Vec<String>,
}

/// Trainer builds a workout for the fixture client: one set, one exercise, three rounds
async fn build_workout(env: &TestGym) -> Built {
    let trainer = env.token(&env.trainer);
    let exercise = create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();

    let workout: Value = AxumTestRequest::post("/api/workouts")
        .bearer(&trainer)
        .json(&json!({
            "client_id": env.client.id,
            "trainer_id": env.trainer.id,
            "date": "2025-03-14",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let workout_id = workout["id"].as_str().unwrap().to_owned();
    assert_eq!(workout["status"], "IN_PROGRESS");

    let set: Value = AxumTestRequest::post(&format!("/api/workouts/{workout_id}/sets"))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let set_id = set["id"].as_str().unwrap().to_owned();
    assert_eq!(set["order"], 1);

    let rounds: Vec<Value> = AxumTestRequest::post(&format!("/api/sets/{set_id}/exercises"))
        .bearer(&trainer)
        .json(&json!({
            "exercise_id": exercise.id,
            "rounds": 3,
            "target_reps": 10,
            "target_weight": 60.0,
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    Built {
        workout_id,
        set_id,
        exercise_id: exercise.id.to_string(),
        round_ids: rounds
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_owned())
            .collect(),
    }
}

async fn get_workout(env: &TestGym, token: &str, id: &str) -> Value {
    AxumTestRequest::get(&format!("/api/workouts/{id}"))
        .bearer(token)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json()
}

// ============================================================================
// Structure
// ============================================================================

#[tokio::test]
async fn test_build_workout_groups_rounds() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    assert_eq!(built.round_ids.len(), 3);

    let detail = get_workout(&env, &env.token(&env.trainer), &built.workout_id).await;
    assert_eq!(detail["client"]["id"], env.client.id.to_string());
    assert_eq!(detail["trainer"]["id"], env.trainer.id.to_string());

    let sets = detail["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    let groups = sets[0]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["exercise_name"], "Bench Press");

    let rounds = groups[0]["rounds"].as_array().unwrap();
    let numbers: Vec<i64> = rounds.iter().map(|r| r["round"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(rounds.iter().all(|r| r["target_reps"] == 10));
}

#[tokio::test]
async fn test_add_round_copies_last_targets() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;

    let round: Value = AxumTestRequest::post(&format!("/api/sets/{}/rounds", built.set_id))
        .bearer(&env.token(&env.trainer))
        .json(&json!({ "exercise_id": built.exercise_id, "order": 1 }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(round["round"], 4);
    assert_eq!(round["target_reps"], 10);
    assert_eq!(round["target_weight"], 60.0);
}

#[tokio::test]
async fn test_update_all_rounds_and_delete_group() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let trainer = env.token(&env.trainer);

    let updated: Value = AxumTestRequest::put(&format!("/api/sets/{}/targets", built.set_id))
        .bearer(&trainer)
        .json(&json!({
            "exercise_id": built.exercise_id,
            "order": 1,
            "target_reps": 8,
            "target_weight": 65,
            "modifier": "paused",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["updated"], 3);

    let detail = get_workout(&env, &trainer, &built.workout_id).await;
    let rounds = detail["sets"][0]["groups"][0]["rounds"].as_array().unwrap();
    assert!(rounds.iter().all(|r| r["target_reps"] == 8 && r["modifier"] == "paused"));

    let deleted: Value = AxumTestRequest::delete(&format!(
        "/api/sets/{}/groups?exercise_id={}&order=1",
        built.set_id, built.exercise_id
    ))
    .bearer(&trainer)
    .send(env.router())
    .await
    .assert_status(StatusCode::OK)
    .json();
    assert_eq!(deleted["deleted"], 3);

    let detail = get_workout(&env, &trainer, &built.workout_id).await;
    assert!(detail["sets"][0]["groups"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_copy_from_completed_workout() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let trainer = env.token(&env.trainer);

    AxumTestRequest::put(&format!("/api/set-exercises/{}", built.round_ids[0]))
        .bearer(&trainer)
        .json(&json!({ "actual_reps": 9, "actual_weight": 60.0, "completed": true }))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::post(&format!("/api/workouts/{}/complete", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let recent: Vec<Value> =
        AxumTestRequest::get(&format!("/api/clients/{}/recent-workouts", env.client.id))
            .bearer(&trainer)
            .send(env.router())
            .await
            .assert_status(StatusCode::OK)
            .json();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["summary"], "2025-03-14 - Bench Press");

    let copy: Value = AxumTestRequest::post("/api/workouts")
        .bearer(&trainer)
        .json(&json!({
            "client_id": env.client.id,
            "copy_from_id": built.workout_id,
            "date": "2025-03-21",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let detail = get_workout(&env, &trainer, copy["id"].as_str().unwrap()).await;
    let rounds = detail["sets"][0]["groups"][0]["rounds"].as_array().unwrap();
    assert_eq!(rounds.len(), 3);
    assert!(rounds.iter().all(|r| r["target_reps"] == 10));
    assert!(rounds.iter().all(|r| r["actual_reps"].is_null()));
    assert!(rounds.iter().all(|r| r["completed"] == false));
}

#[tokio::test]
async fn test_unknown_copy_source_creates_empty_workout() {
    let env = TestGym::new().await.unwrap();
    let trainer = env.token(&env.trainer);

    let workout: Value = AxumTestRequest::post("/api/workouts")
        .bearer(&trainer)
        .json(&json!({
            "client_id": env.client.id,
            "copy_from_id": uuid::Uuid::new_v4(),
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let detail = get_workout(&env, &trainer, workout["id"].as_str().unwrap()).await;
    assert!(detail["sets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_workout_requires_client() {
    let env = TestGym::new().await.unwrap();
    let code = AxumTestRequest::post("/api/workouts")
        .bearer(&env.token(&env.trainer))
        .json(&json!({}))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "MISSING_REQUIRED_FIELD");
}

// ============================================================================
// Locking
// ============================================================================

#[tokio::test]
async fn test_completed_workout_is_locked() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let trainer = env.token(&env.trainer);

    AxumTestRequest::post(&format!("/api/workouts/{}/complete", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let code = AxumTestRequest::post(&format!("/api/workouts/{}/sets", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_LOCKED");

    let code = AxumTestRequest::delete(&format!("/api/set-exercises/{}", built.round_ids[0]))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_LOCKED");

    // Clients can no longer log; staff still can
    AxumTestRequest::put(&format!("/api/set-exercises/{}", built.round_ids[0]))
        .bearer(&env.token(&env.client))
        .json(&json!({ "actual_reps": 10 }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::put(&format!("/api/set-exercises/{}", built.round_ids[0]))
        .bearer(&trainer)
        .json(&json!({ "actual_reps": 10 }))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_completed_workout_details_and_status_are_final() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let trainer = env.token(&env.trainer);
    let complete = format!("/api/workouts/{}/complete", built.workout_id);

    AxumTestRequest::post(&complete)
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let code = AxumTestRequest::put(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&trainer)
        .json(&json!({ "date": "2030-01-01" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_LOCKED");

    let code = AxumTestRequest::post(&complete)
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_LOCKED");

    let detail = get_workout(&env, &trainer, &built.workout_id).await;
    assert_eq!(detail["date"], "2025-03-14");

    // Removing the whole workout is still possible
    AxumTestRequest::delete(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

// ============================================================================
// Access
// ============================================================================

#[tokio::test]
async fn test_client_logs_own_workout() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let client = env.token(&env.client);

    let row: Value = AxumTestRequest::put(&format!("/api/set-exercises/{}", built.round_ids[1]))
        .bearer(&client)
        .json(&json!({
            "actual_reps": 10,
            "actual_weight": 62.5,
            "notes": "  felt strong  ",
            "completed": true,
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(row["actual_weight"], 62.5);
    assert_eq!(row["notes"], "felt strong");
    assert_eq!(row["completed"], true);

    let list: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&client)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_client_cannot_restructure() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;

    let code = AxumTestRequest::post(&format!("/api/workouts/{}/sets", built.workout_id))
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .error_code();
    assert_eq!(code, "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_other_client_is_denied() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;

    AxumTestRequest::get(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&env.token(&env.other_client))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let list: Vec<Value> = AxumTestRequest::get("/api/workouts")
        .bearer(&env.token(&env.other_client))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_other_gym_sees_not_found() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;

    let code = AxumTestRequest::get(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&env.token(&env.outsider))
        .send(env.router())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .error_code();
    assert_eq!(code, "RESOURCE_NOT_FOUND");

    // Platform admins see every gym
    get_workout(&env, &env.token(&env.admin), &built.workout_id).await;
}

#[tokio::test]
async fn test_update_details_and_delete() {
    let env = TestGym::new().await.unwrap();
    let built = build_workout(&env).await;
    let trainer = env.token(&env.trainer);

    AxumTestRequest::put(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&trainer)
        .json(&json!({ "date": "2025-04-01", "trainer_id": "none" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let detail = get_workout(&env, &trainer, &built.workout_id).await;
    assert_eq!(detail["date"], "2025-04-01");
    assert!(detail["trainer"].is_null());

    AxumTestRequest::delete(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    AxumTestRequest::get(&format!("/api/workouts/{}", built.workout_id))
        .bearer(&trainer)
        .send(env.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_invalid_format() {
    let env = TestGym::new().await.unwrap();
    let code = AxumTestRequest::get("/api/workouts/not-a-uuid")
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "INVALID_FORMAT");
}

// ============================================================================
// Malformed input
// ============================================================================

#[tokio::test]
async fn test_bad_body_without_credentials_is_auth_required() {
    let env = TestGym::new().await.unwrap();
    let code = AxumTestRequest::post("/api/workouts")
        .json(&json!({ "client_id": "not-a-uuid" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error_code();
    assert_eq!(code, "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_bad_body_is_reported_as_json_error() {
    let env = TestGym::new().await.unwrap();
    let response = AxumTestRequest::post("/api/workouts")
        .bearer(&env.token(&env.trainer))
        .json(&json!({ "client_id": "not-a-uuid" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(response.error_code(), "INVALID_INPUT");

    let code = AxumTestRequest::delete("/api/sets/00000000-0000-0000-0000-000000000000/groups?order=first")
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "INVALID_INPUT");
}
