// ABOUTME: Gym tenant database operations
// ABOUTME: Gym CRUD, branding updates, and the default-gym backfill for legacy rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_timestamp, parse_uuid, Database};
use crate::constants::seed::{DEFAULT_GYM_NAME, DEFAULT_GYM_SLUG};
use crate::errors::{AppError, AppResult};
use crate::models::{Gym, GymId};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

/// Outcome of [`Database::assign_default_gym`]
#[derive(Debug, Clone, Serialize)]
pub struct DefaultGymReport {
    /// The default gym
    pub gym_id: GymId,
    /// Whether the gym had to be created
    pub gym_created: bool,
    /// Users attached to the gym
    pub users: u64,
    /// Workout sessions attached to the gym
    pub workouts: u64,
    /// Custom exercises attached to the gym
    pub custom_exercises: u64,
    /// Imported exercises marked global
    pub imported_exercises: u64,
}

impl Database {
    pub(super) async fn migrate_gyms(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS gyms (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                logo TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create gyms table: {e}")))?;
        Ok(())
    }

    /// Insert a gym
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the slug is taken
    pub async fn create_gym(&self, gym: &Gym) -> AppResult<()> {
        sqlx::query("INSERT INTO gyms (id, name, slug, logo, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(gym.id.to_string())
            .bind(&gym.name)
            .bind(&gym.slug)
            .bind(&gym.logo)
            .bind(gym.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetch a gym by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_gym(&self, gym_id: GymId) -> AppResult<Option<Gym>> {
        let row = sqlx::query("SELECT id, name, slug, logo, created_at FROM gyms WHERE id = ?")
            .bind(gym_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch gym: {e}")))?;
        row.as_ref().map(row_to_gym).transpose()
    }

    /// Fetch a gym by slug
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_gym_by_slug(&self, slug: &str) -> AppResult<Option<Gym>> {
        let row = sqlx::query("SELECT id, name, slug, logo, created_at FROM gyms WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch gym: {e}")))?;
        row.as_ref().map(row_to_gym).transpose()
    }

    /// Rename a gym
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the gym does not exist
    pub async fn update_gym_name(&self, gym_id: GymId, name: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE gyms SET name = ? WHERE id = ?")
            .bind(name)
            .bind(gym_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Gym"));
        }
        Ok(())
    }

    /// Set or clear a gym's logo
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the gym does not exist
    pub async fn set_gym_logo(&self, gym_id: GymId, logo: Option<&str>) -> AppResult<()> {
        let result = sqlx::query("UPDATE gyms SET logo = ? WHERE id = ?")
            .bind(logo)
            .bind(gym_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Gym"));
        }
        Ok(())
    }

    /// Attach legacy rows without a gym to the `default` gym
    ///
    /// Creates the gym when missing. Non-admin users, workout sessions, and
    /// custom exercises without a gym are attached to it; imported exercises
    /// are marked global. Runs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns a database error if any update fails
    pub async fn assign_default_gym(&self) -> AppResult<DefaultGymReport> {
        let (gym, gym_created) = match self.get_gym_by_slug(DEFAULT_GYM_SLUG).await? {
            Some(gym) => (gym, false),
            None => {
                let gym = Gym::new(DEFAULT_GYM_NAME.to_owned(), DEFAULT_GYM_SLUG.to_owned());
                self.create_gym(&gym).await?;
                (gym, true)
            }
        };
        let gym_id = gym.id.to_string();

        let mut tx = self.pool.begin().await?;

        let users = sqlx::query("UPDATE users SET gym_id = ? WHERE gym_id IS NULL AND role != 'ADMIN'")
            .bind(&gym_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let workouts = sqlx::query("UPDATE workout_sessions SET gym_id = ? WHERE gym_id IS NULL")
            .bind(&gym_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let custom_exercises = sqlx::query(
            "UPDATE exercises SET gym_id = ? WHERE gym_id IS NULL AND source = 'CUSTOM' AND is_global = 0",
        )
        .bind(&gym_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let imported_exercises =
            sqlx::query("UPDATE exercises SET is_global = 1 WHERE source = 'IMPORTED' AND is_global = 0")
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;

        info!(
            gym_id = %gym.id,
            gym_created,
            users,
            workouts,
            custom_exercises,
            imported_exercises,
            "Default gym assignment complete"
        );

        Ok(DefaultGymReport {
            gym_id: gym.id,
            gym_created,
            users,
            workouts,
            custom_exercises,
            imported_exercises,
        })
    }
}

fn row_to_gym(row: &SqliteRow) -> AppResult<Gym> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    Ok(Gym {
        id: GymId::from(parse_uuid(&id)?),
        name: row.get("name"),
        slug: row.get("slug"),
        logo: row.get("logo"),
        created_at: parse_timestamp(&created_at)?,
    })
}
