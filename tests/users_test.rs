// ABOUTME: Integration tests for user management routes
// ABOUTME: Account creation rules, role escalation limits, former members, and gym-scoped rosters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::TestGym;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_trainer_creates_client_in_own_gym() {
    let env = TestGym::new().await.unwrap();

    let user: Value = AxumTestRequest::post("/api/users")
        .bearer(&env.token(&env.trainer))
        .json(&json!({
            "name": "New Client",
            "email": " New.Client@Example.com ",
            "password": "long-enough",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(user["email"], "new.client@example.com");
    assert_eq!(user["role"], "CLIENT");
    assert_eq!(user["gym_id"], env.gym.id.to_string());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_trainer_cannot_escalate() {
    let env = TestGym::new().await.unwrap();

    let code = AxumTestRequest::post("/api/users")
        .bearer(&env.token(&env.trainer))
        .json(&json!({
            "name": "Boss",
            "email": "boss@example.com",
            "password": "long-enough",
            "role": "GYM_ADMIN",
        }))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .error_code();
    assert_eq!(code, "PERMISSION_DENIED");

    // Editing a higher role is refused as well
    AxumTestRequest::put(&format!("/api/users/{}", env.gym_admin.id))
        .bearer(&env.token(&env.trainer))
        .json(&json!({ "name": "Renamed" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_user_validation() {
    let env = TestGym::new().await.unwrap();
    let token = env.token(&env.gym_admin);

    let code = AxumTestRequest::post("/api/users")
        .bearer(&token)
        .json(&json!({ "name": "Short", "email": "short@example.com", "password": "abc" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "INVALID_INPUT");

    let code = AxumTestRequest::post("/api/users")
        .bearer(&token)
        .json(&json!({ "name": "Bad", "email": "not-an-email", "password": "long-enough" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_code();
    assert_eq!(code, "INVALID_FORMAT");

    let code = AxumTestRequest::post("/api/users")
        .bearer(&token)
        .json(&json!({ "name": "Dup", "email": "CLIENT@example.com", "password": "long-enough" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_client_cannot_manage_users() {
    let env = TestGym::new().await.unwrap();
    AxumTestRequest::get("/api/clients")
        .bearer(&env.token(&env.client))
        .send(env.router())
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_former_members_hidden_by_default() {
    let env = TestGym::new().await.unwrap();
    let token = env.token(&env.trainer);

    AxumTestRequest::post(&format!("/api/users/{}/former", env.other_client.id))
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let active: Vec<Value> = AxumTestRequest::get("/api/clients")
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(active.len(), 1);

    let all: Vec<Value> = AxumTestRequest::get("/api/clients?show_former=true")
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|u| u["status"] == "FORMER"));

    AxumTestRequest::post(&format!("/api/users/{}/reactivate", env.other_client.id))
        .bearer(&token)
        .send(env.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let active: Vec<Value> = AxumTestRequest::get("/api/clients")
        .bearer(&token)
        .send(env.router())
        .await
        .json();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn test_cannot_mark_self_former() {
    let env = TestGym::new().await.unwrap();
    AxumTestRequest::post(&format!("/api/users/{}/former", env.trainer.id))
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rosters_are_gym_scoped() {
    let env = TestGym::new().await.unwrap();

    let trainers: Vec<Value> = AxumTestRequest::get("/api/trainers")
        .bearer(&env.token(&env.trainer))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let emails: Vec<&str> = trainers.iter().map(|u| u["email"].as_str().unwrap()).collect();
    assert!(emails.contains(&"trainer@example.com"));
    assert!(emails.contains(&"owner@example.com"));
    assert!(!emails.contains(&"outsider@example.com"));

    // Users of another gym are invisible
    AxumTestRequest::post(&format!("/api/users/{}/former", env.client.id))
        .bearer(&env.token(&env.outsider))
        .send(env.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Platform admins see everyone
    let everyone: Vec<Value> = AxumTestRequest::get("/api/users")
        .bearer(&env.token(&env.admin))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(everyone.len(), 6);
}

#[tokio::test]
async fn test_update_user_details() {
    let env = TestGym::new().await.unwrap();
    let token = env.token(&env.trainer);

    let user: Value = AxumTestRequest::put(&format!("/api/users/{}", env.client.id))
        .bearer(&token)
        .json(&json!({ "name": "  Renamed Client ", "email": "Renamed@Example.com" }))
        .send(env.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(user["name"], "Renamed Client");
    assert_eq!(user["email"], "renamed@example.com");
    assert_eq!(user["role"], "CLIENT");

    let stored = env.db().get_user(env.client.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "renamed@example.com");

    let code = AxumTestRequest::put(&format!("/api/users/{}", env.client.id))
        .bearer(&token)
        .json(&json!({ "email": env.other_client.email }))
        .send(env.router())
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_code();
    assert_eq!(code, "RESOURCE_ALREADY_EXISTS");
}
