// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, a seeded gym with one user per role, tokens, and exercise fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `gymtrack_server`

use anyhow::Result;
use axum::Router;
use gymtrack_server::{
    auth::{hash_password, AuthManager},
    config::ServerConfig,
    database::Database,
    models::{Exercise, Gym, NewExercise, User},
    permissions::UserRole,
    resources::ServerResources,
    server::build_router,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Password shared by accounts created with [`create_user_with_password`]
pub const TEST_PASSWORD: &str = "correct-horse";

/// Signing secret of the test `AuthManager`
pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret-with-enough-bytes";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Server resources over a fresh in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = AuthManager::new(TEST_JWT_SECRET, 24);
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        ServerConfig::default(),
    )))
}

/// Create a gym with the given slug
pub async fn create_gym(database: &Database, name: &str, slug: &str) -> Result<Gym> {
    let gym = Gym::new(name.to_owned(), slug.to_owned());
    database.create_gym(&gym).await?;
    Ok(gym)
}

/// Create a user whose password hash is a placeholder
pub async fn create_user(
    database: &Database,
    gym: Option<&Gym>,
    role: UserRole,
    email: &str,
) -> Result<User> {
    let name = email.split('@').next().unwrap_or(email).to_owned();
    let user = User::new(
        email.to_owned(),
        name,
        "test_hash".to_owned(),
        role,
        gym.map(|g| g.id),
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// Create a user that can log in with [`TEST_PASSWORD`]
pub async fn create_user_with_password(
    database: &Database,
    gym: Option<&Gym>,
    role: UserRole,
    email: &str,
) -> Result<User> {
    let user = User::new(
        email.to_owned(),
        "Login User".to_owned(),
        hash_password(TEST_PASSWORD).await?,
        role,
        gym.map(|g| g.id),
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// Create a custom exercise owned by `gym`
pub async fn create_exercise(database: &Database, gym: &Gym, name: &str) -> Result<Exercise> {
    let exercise = NewExercise {
        name: name.to_owned(),
        category: Some("strength".to_owned()),
        primary_muscle: Some("chest".to_owned()),
        equipment: Some("barbell".to_owned()),
        gym_id: Some(gym.id),
        ..NewExercise::default()
    };
    Ok(database.create_exercise(&exercise).await?)
}

/// Issue a token for `user`
pub fn token_for(resources: &ServerResources, user: &User, gym: Option<&Gym>) -> String {
    resources
        .auth_manager
        .generate_token(user, gym)
        .expect("token generation")
}

/// A gym with one account per role plus a second client and an outside gym
pub struct TestGym {
    pub resources: Arc<ServerResources>,
    pub gym: Gym,
    pub other_gym: Gym,
    pub admin: User,
    pub gym_admin: User,
    pub trainer: User,
    pub client: User,
    pub other_client: User,
    pub outsider: User,
}

impl TestGym {
    /// Build the fixture
    pub async fn new() -> Result<Self> {
        let resources = create_test_server_resources().await?;
        let db = &resources.database;

        let gym = create_gym(db, "Iron Temple", "iron-temple").await?;
        let other_gym = create_gym(db, "Other Gym", "other-gym").await?;

        let admin = create_user(db, None, UserRole::Admin, "admin@example.com").await?;
        let gym_admin = create_user(db, Some(&gym), UserRole::GymAdmin, "owner@example.com").await?;
        let trainer = create_user(db, Some(&gym), UserRole::Trainer, "trainer@example.com").await?;
        let client = create_user(db, Some(&gym), UserRole::Client, "client@example.com").await?;
        let other_client =
            create_user(db, Some(&gym), UserRole::Client, "client2@example.com").await?;
        let outsider =
            create_user(db, Some(&other_gym), UserRole::Trainer, "outsider@example.com").await?;

        Ok(Self {
            resources,
            gym,
            other_gym,
            admin,
            gym_admin,
            trainer,
            client,
            other_client,
            outsider,
        })
    }

    /// Router over the fixture resources
    pub fn router(&self) -> Router {
        build_router(self.resources.clone())
    }

    /// Token for a member of this fixture
    pub fn token(&self, user: &User) -> String {
        let gym = match user.gym_id {
            Some(id) if id == self.gym.id => Some(&self.gym),
            Some(id) if id == self.other_gym.id => Some(&self.other_gym),
            _ => None,
        };
        token_for(&self.resources, user, gym)
    }

    /// Database handle
    pub fn db(&self) -> &Database {
        &self.resources.database
    }
}
