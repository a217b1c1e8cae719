// ABOUTME: Exercise library database operations
// ABOUTME: Scoped search, filter vocabularies, picker listing, custom creation, and bulk import upserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_gym_id, parse_optional_uuid, parse_timestamp, parse_uuid, Database};
use crate::constants::limits::{EXERCISE_PICKER_LIMIT, EXERCISE_SEARCH_LIMIT};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, ExerciseCreator, ExerciseSource, GymScope, NewExercise};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const EXERCISE_SELECT: &str = r"
    SELECT e.id, e.name, e.instructions, e.category, e.primary_muscle, e.equipment,
           e.images, e.source, e.source_id, e.is_active, e.is_global, e.gym_id,
           e.created_by_id, u.name AS created_by_name, e.created_at
    FROM exercises e
    LEFT JOIN users u ON u.id = e.created_by_id
";

/// Visible to the caller: global, or owned by the caller's gym
const VISIBLE: &str = "(e.is_global = 1 OR e.gym_id IS ? OR ?)";

/// Library search filters; `None` means no filter
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Exact primary muscle
    pub primary_muscle: Option<String>,
    /// Exact equipment
    pub equipment: Option<String>,
}

/// Distinct values present in the visible library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseFilterOptions {
    /// Categories, ascending
    pub categories: Vec<String>,
    /// Primary muscles, ascending
    pub primary_muscles: Vec<String>,
    /// Equipment, ascending
    pub equipment: Vec<String>,
}

/// Compact exercise entry for the workout editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePickerItem {
    /// Exercise id
    pub id: Uuid,
    /// Name
    pub name: String,
    /// Category
    pub category: Option<String>,
    /// Primary muscle
    pub primary_muscle: Option<String>,
    /// Equipment
    pub equipment: Option<String>,
}

impl Database {
    pub(super) async fn migrate_exercises(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                instructions TEXT,
                category TEXT,
                primary_muscle TEXT,
                equipment TEXT,
                images TEXT NOT NULL DEFAULT '[]',
                source TEXT NOT NULL DEFAULT 'CUSTOM' CHECK (source IN ('IMPORTED', 'CUSTOM')),
                source_id TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                is_global INTEGER NOT NULL DEFAULT 0,
                gym_id TEXT REFERENCES gyms(id) ON DELETE CASCADE,
                created_by_id TEXT REFERENCES users(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL,
                UNIQUE (name, source, source_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_gym ON exercises(gym_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create exercises index: {e}")))?;
        Ok(())
    }

    /// Insert an exercise and return it
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails
    pub async fn create_exercise(&self, exercise: &NewExercise) -> AppResult<Exercise> {
        let id = Uuid::new_v4();
        let images = serde_json::to_string(&exercise.images)?;

        sqlx::query(
            r"
            INSERT INTO exercises (id, name, instructions, category, primary_muscle, equipment,
                                   images, source, source_id, is_active, is_global, gym_id,
                                   created_by_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(&exercise.name)
        .bind(&exercise.instructions)
        .bind(&exercise.category)
        .bind(&exercise.primary_muscle)
        .bind(&exercise.equipment)
        .bind(images)
        .bind(exercise.source.as_str())
        .bind(&exercise.source_id)
        .bind(exercise.is_global)
        .bind(exercise.gym_id.map(|g| g.to_string()))
        .bind(exercise.created_by_id.map(|u| u.to_string()))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        self.get_exercise(id, GymScope::unrestricted())
            .await?
            .ok_or_else(|| AppError::internal("Exercise vanished after insert"))
    }

    /// Fetch an exercise if it is visible in `scope`
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_exercise(&self, id: Uuid, scope: GymScope) -> AppResult<Option<Exercise>> {
        let sql = format!("{EXERCISE_SELECT} WHERE e.id = ? AND {VISIBLE}");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .bind(scope.gym_param())
            .bind(scope.unrestricted)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch exercise: {e}")))?;
        row.as_ref().map(row_to_exercise).transpose()
    }

    /// Search the visible library, ordered by name
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list_exercises(
        &self,
        scope: GymScope,
        filter: &ExerciseFilter,
    ) -> AppResult<Vec<Exercise>> {
        let sql = format!(
            r"
            {EXERCISE_SELECT}
            WHERE {VISIBLE}
              AND (? IS NULL OR LOWER(e.name) LIKE ? ESCAPE '\')
              AND (? IS NULL OR e.category = ?)
              AND (? IS NULL OR e.primary_muscle = ?)
              AND (? IS NULL OR e.equipment = ?)
            ORDER BY e.name COLLATE NOCASE ASC
            LIMIT ?
            "
        );

        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(&s.to_lowercase())));

        let rows = sqlx::query(&sql)
            .bind(scope.gym_param())
            .bind(scope.unrestricted)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&filter.category)
            .bind(&filter.category)
            .bind(&filter.primary_muscle)
            .bind(&filter.primary_muscle)
            .bind(&filter.equipment)
            .bind(&filter.equipment)
            .bind(EXERCISE_SEARCH_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter().map(row_to_exercise).collect()
    }

    /// Distinct categories, muscles, and equipment in the visible library
    ///
    /// # Errors
    ///
    /// Returns a database error if a query fails
    pub async fn exercise_filter_options(&self, scope: GymScope) -> AppResult<ExerciseFilterOptions> {
        Ok(ExerciseFilterOptions {
            categories: self.distinct_exercise_values("category", scope).await?,
            primary_muscles: self.distinct_exercise_values("primary_muscle", scope).await?,
            equipment: self.distinct_exercise_values("equipment", scope).await?,
        })
    }

    async fn distinct_exercise_values(&self, column: &str, scope: GymScope) -> AppResult<Vec<String>> {
        let sql = format!(
            r"
            SELECT DISTINCT e.{column} AS value FROM exercises e
            WHERE {VISIBLE} AND e.{column} IS NOT NULL AND e.{column} != ''
            ORDER BY value ASC
            "
        );
        let rows = sqlx::query(&sql)
            .bind(scope.gym_param())
            .bind(scope.unrestricted)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list {column} values: {e}")))?;
        Ok(rows.iter().map(|row| row.get("value")).collect())
    }

    /// Active visible exercises for the workout editor
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn exercise_picker(&self, scope: GymScope) -> AppResult<Vec<ExercisePickerItem>> {
        let sql = format!(
            r"
            SELECT e.id, e.name, e.category, e.primary_muscle, e.equipment
            FROM exercises e
            WHERE e.is_active = 1 AND {VISIBLE}
            ORDER BY e.name COLLATE NOCASE ASC
            LIMIT ?
            "
        );
        let rows = sqlx::query(&sql)
            .bind(scope.gym_param())
            .bind(scope.unrestricted)
            .bind(EXERCISE_PICKER_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list picker exercises: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(ExercisePickerItem {
                    id: parse_uuid(&id)?,
                    name: row.get("name"),
                    category: row.get("category"),
                    primary_muscle: row.get("primary_muscle"),
                    equipment: row.get("equipment"),
                })
            })
            .collect()
    }

    /// Insert or refresh an imported exercise keyed on (name, source, `source_id`)
    ///
    /// Returns `true` when a new row was inserted.
    ///
    /// # Errors
    ///
    /// Returns a database error if the upsert fails
    pub async fn upsert_imported_exercise(&self, exercise: &NewExercise) -> AppResult<bool> {
        let existing: Option<String> = sqlx::query_scalar(
            "SELECT id FROM exercises WHERE name = ? AND source = ? AND source_id IS ?",
        )
        .bind(&exercise.name)
        .bind(ExerciseSource::Imported.as_str())
        .bind(&exercise.source_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(id) = existing else {
            self.create_exercise(exercise).await?;
            return Ok(true);
        };

        sqlx::query(
            r"
            UPDATE exercises SET
                instructions = ?, category = ?, primary_muscle = ?, equipment = ?,
                images = ?, is_global = 1
            WHERE id = ?
            ",
        )
        .bind(&exercise.instructions)
        .bind(&exercise.category)
        .bind(&exercise.primary_muscle)
        .bind(&exercise.equipment)
        .bind(serde_json::to_string(&exercise.images)?)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(false)
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_to_exercise(row: &SqliteRow) -> AppResult<Exercise> {
    let id: String = row.get("id");
    let images_json: String = row.get("images");
    let source: String = row.get("source");
    let created_at: String = row.get("created_at");
    let is_active: i64 = row.get("is_active");
    let is_global: i64 = row.get("is_global");

    let created_by = parse_optional_uuid(row.get("created_by_id"))?.map(|id| ExerciseCreator {
        id,
        name: row
            .get::<Option<String>, _>("created_by_name")
            .unwrap_or_default(),
    });

    Ok(Exercise {
        id: parse_uuid(&id)?,
        name: row.get("name"),
        instructions: row.get("instructions"),
        category: row.get("category"),
        primary_muscle: row.get("primary_muscle"),
        equipment: row.get("equipment"),
        images: serde_json::from_str(&images_json)?,
        source: ExerciseSource::parse(&source),
        source_id: row.get("source_id"),
        is_active: is_active == 1,
        is_global: is_global == 1,
        gym_id: parse_gym_id(row.get("gym_id"))?,
        created_by,
        created_at: parse_timestamp(&created_at)?,
    })
}
