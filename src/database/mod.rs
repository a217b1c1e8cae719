// ABOUTME: SQLite persistence layer for gyms, users, exercises, workouts, and progress
// ABOUTME: Owns the connection pool, runs schema migrations, and shares row parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` wraps a `SQLite` pool. Queries are grouped per domain in the
//! submodules, each adding an `impl Database` block and its own migration.
//!
//! Identifiers are stored as UUID text, workout dates as `YYYY-MM-DD`, and
//! timestamps as RFC 3339. Foreign keys are enforced so deleting a workout
//! cascades to its sets and their rounds.

mod exercises;
mod gyms;
mod progress;
mod seed;
mod users;
mod workouts;

pub use exercises::{ExerciseFilter, ExerciseFilterOptions, ExercisePickerItem};
pub use gyms::DefaultGymReport;
pub use progress::ExerciseWithHistory;
pub use seed::SeedReport;
pub use users::UserUpdate;
pub use workouts::{SetExerciseActuals, SetRecord, WorkoutListItem, WorkoutSummaryRow};

use crate::errors::{AppError, AppResult};
use crate::models::GymId;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Database manager for all GymTrack storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// In-memory databases get a single connection so every query sees the
    /// same schema and data.
    ///
    /// # Errors
    ///
    /// Returns a database error if the URL is invalid, the connection fails,
    /// or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL '{database_url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready ({database_url})");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations in dependency order
    ///
    /// # Errors
    ///
    /// Returns a database error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_gyms().await?;
        self.migrate_users().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        Ok(())
    }

    /// Cheap round trip used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns a database error if the pool cannot serve a query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID '{value}': {e}")))
}

pub(crate) fn parse_optional_uuid(value: Option<String>) -> AppResult<Option<Uuid>> {
    value.as_deref().map(parse_uuid).transpose()
}

pub(crate) fn parse_gym_id(value: Option<String>) -> AppResult<Option<GymId>> {
    Ok(parse_optional_uuid(value)?.map(GymId::from))
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime '{value}': {e}")))
}

pub(crate) fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::internal(format!("Invalid date '{value}': {e}")))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
