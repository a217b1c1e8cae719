// ABOUTME: Integration tests for the exercise library
// ABOUTME: Dataset import upserts, gym-private custom exercises, filtering, and filter vocabularies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_exercise, TestGym};
use gymtrack_server::{models::ImportedExercise, services::exercises::import_exercises};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn dataset() -> Vec<ImportedExercise> {
    serde_json::from_value(json!([
        {
            "id": "Barbell_Curl",
            "name": "Barbell Curl",
            "force": "pull",
            "level": "beginner",
            "mechanic": "isolation",
            "equipment": "barbell",
            "primaryMuscles": ["biceps"],
            "secondaryMuscles": ["forearms"],
            "instructions": ["Stand up.", "Curl the bar."],
            "category": "strength",
            "images": ["Barbell_Curl/0.jpg"]
        },
        {
            "id": "Rowing_Machine",
            "name": "Rowing, Stationary",
            "equipment": "machine",
            "primaryMuscles": ["quadriceps"],
            "category": "cardio"
        },
        { "id": "", "name": "No Id" }
    ]))
    .unwrap()
}

#[tokio::test]
async fn test_import_is_idempotent() {
    let env = TestGym::new().await.unwrap();

    let first = import_exercises(env.db(), dataset()).await.unwrap();
    assert_eq!((first.inserted, first.updated, first.skipped), (2, 0, 1));

    let second = import_exercises(env.db(), dataset()).await.unwrap();
    assert_eq!((second.inserted, second.updated, second.skipped), (0, 2, 1));

    let list: Vec<Value> = AxumTestRequest::get("/api/exercises?search=curl")
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["source"], "IMPORTED");
    assert_eq!(list[0]["primary_muscle"], "biceps");
    assert!(list[0]["images"][0]
        .as_str()
        .unwrap()
        .ends_with("Barbell_Curl/0.jpg"));
}

#[tokio::test]
async fn test_custom_exercises_are_private_to_gym() {
    let env = TestGym::new().await.unwrap();

    let created: Value = AxumTestRequest::post("/api/exercises")
        .bearer(&env.token(&env.trainer))
        .json(&json!({
            "name": " Sled Push ",
            "category": "strength",
            "primary_muscle": "quadriceps",
            "equipment": "other",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["name"], "Sled Push");
    assert_eq!(created["source"], "CUSTOM");

    let mine: Vec<Value> = AxumTestRequest::get("/api/exercises?search=sled")
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .json();
    assert_eq!(mine.len(), 1);

    let theirs: Vec<Value> = AxumTestRequest::get("/api/exercises?search=sled")
        .bearer(&env.token(&env.outsider))
        .send(env.router())
        .await
        .json();
    assert!(theirs.is_empty());
}

#[tokio::test]
async fn test_clients_cannot_create_exercises() {
    let env = TestGym::new().await.unwrap();
    AxumTestRequest::post("/api/exercises")
        .bearer(&env.token(&env.client))
        .json(&json!({ "name": "Nope" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let code = AxumTestRequest::post("/api/exercises")
        .bearer(&env.token(&env.trainer))
        .json(&json!({ "name": "   " }))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_filters_and_all_sentinel() {
    let env = TestGym::new().await.unwrap();
    import_exercises(env.db(), dataset()).await.unwrap();
    create_exercise(env.db(), &env.gym, "Bench Press").await.unwrap();
    let token = env.token(&env.trainer);

    let cardio: Vec<Value> = AxumTestRequest::get("/api/exercises?category=cardio")
        .bearer(&token)
        .send(env.router())
        .await
        .json();
    assert_eq!(cardio.len(), 1);
    assert_eq!(cardio[0]["name"], "Rowing, Stationary");

    let all: Vec<Value> = AxumTestRequest::get("/api/exercises?category=all&equipment=all")
        .bearer(&token)
        .send(env.router())
        .await
        .json();
    assert_eq!(all.len(), 3);

    let filters: Value = AxumTestRequest::get("/api/exercises/filters")
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let categories = filters["categories"].as_array().unwrap();
    assert!(categories.contains(&json!("cardio")));
    assert!(categories.contains(&json!("strength")));
    assert!(filters["vocabulary"]["equipment"]
        .as_array()
        .unwrap()
        .contains(&json!("barbell")));

    let picker: Vec<Value> = AxumTestRequest::get("/api/exercises/picker")
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(picker.len(), 3);
}
