// ABOUTME: Progress queries over completed set-exercise rows
// ABOUTME: Raw samples for chart aggregation and the exercises a scope has history for
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_date, parse_date, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{DateRange, GymScope, ProgressSample};
use serde::Serialize;
use sqlx::Row;
use uuid::Uuid;

/// An exercise with at least one completed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseWithHistory {
    /// Exercise id
    pub id: Uuid,
    /// Exercise name
    pub name: String,
}

impl Database {
    /// Completed rows of one exercise within scope and range, ordered by date
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn progress_samples(
        &self,
        scope: GymScope,
        exercise_id: Uuid,
        client_id: Option<Uuid>,
        range: DateRange,
    ) -> AppResult<Vec<ProgressSample>> {
        let client = client_id.map(|c| c.to_string());
        let start = range.start.map(format_date);
        let end = range.end.map(format_date);

        let rows = sqlx::query(
            r"
            SELECT ws.date, ws.client_id, u.name AS client_name,
                   se.actual_weight, se.actual_reps
            FROM set_exercises se
            JOIN workout_sets s ON s.id = se.workout_set_id
            JOIN workout_sessions ws ON ws.id = s.workout_session_id
            JOIN users u ON u.id = ws.client_id
            WHERE se.exercise_id = ?
              AND se.completed = 1
              AND (? OR ws.gym_id IS ?)
              AND (? IS NULL OR ws.client_id = ?)
              AND (? IS NULL OR ws.date >= ?)
              AND (? IS NULL OR ws.date <= ?)
            ORDER BY ws.date ASC
            ",
        )
        .bind(exercise_id.to_string())
        .bind(scope.unrestricted)
        .bind(scope.gym_param())
        .bind(client.clone())
        .bind(client)
        .bind(start.clone())
        .bind(start)
        .bind(end.clone())
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load progress: {e}")))?;

        rows.iter()
            .map(|row| {
                let date: String = row.get("date");
                let client_id: String = row.get("client_id");
                Ok(ProgressSample {
                    date: parse_date(&date)?,
                    client_id: parse_uuid(&client_id)?,
                    client_name: row.get("client_name"),
                    actual_weight: row.get("actual_weight"),
                    actual_reps: row.get("actual_reps"),
                })
            })
            .collect()
    }

    /// Exercises with completed rows in scope, optionally for one client, by name
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn exercises_with_history(
        &self,
        scope: GymScope,
        client_id: Option<Uuid>,
    ) -> AppResult<Vec<ExerciseWithHistory>> {
        let client = client_id.map(|c| c.to_string());
        let rows = sqlx::query(
            r"
            SELECT DISTINCT e.id, e.name
            FROM set_exercises se
            JOIN exercises e ON e.id = se.exercise_id
            JOIN workout_sets s ON s.id = se.workout_set_id
            JOIN workout_sessions ws ON ws.id = s.workout_session_id
            WHERE se.completed = 1
              AND (? OR ws.gym_id IS ?)
              AND (? IS NULL OR ws.client_id = ?)
            ORDER BY e.name COLLATE NOCASE ASC
            ",
        )
        .bind(scope.unrestricted)
        .bind(scope.gym_param())
        .bind(client.clone())
        .bind(client)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises with history: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(ExerciseWithHistory {
                    id: parse_uuid(&id)?,
                    name: row.get("name"),
                })
            })
            .collect()
    }
}
