// ABOUTME: Exercise library business logic
// ABOUTME: Filter normalization, custom exercise creation by staff, and free exercise DB imports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{clean, required};
use crate::auth::AuthResult;
use crate::constants::exercise_vocabulary::FILTER_ALL;
use crate::database::{Database, ExerciseFilter};
use crate::errors::AppResult;
use crate::models::{Exercise, ExerciseSource, ImportedExercise, NewExercise};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Library search parameters as received from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseQuery {
    /// Name substring
    pub search: Option<String>,
    /// Category, `all` for any
    pub category: Option<String>,
    /// Primary muscle, `all` for any
    pub primary_muscle: Option<String>,
    /// Equipment, `all` for any
    pub equipment: Option<String>,
}

impl ExerciseQuery {
    /// Drop blank and `all` values
    #[must_use]
    pub fn into_filter(self) -> ExerciseFilter {
        let facet = |value: Option<String>| clean(value).filter(|v| !v.eq_ignore_ascii_case(FILTER_ALL));
        ExerciseFilter {
            search: clean(self.search),
            category: facet(self.category),
            primary_muscle: facet(self.primary_muscle),
            equipment: facet(self.equipment),
        }
    }
}

/// Custom exercise form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateExerciseRequest {
    /// Display name
    pub name: Option<String>,
    /// Category
    pub category: Option<String>,
    /// Primary muscle
    pub primary_muscle: Option<String>,
    /// Equipment
    pub equipment: Option<String>,
    /// Instructions
    pub instructions: Option<String>,
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows inserted
    pub inserted: usize,
    /// Existing rows refreshed
    pub updated: usize,
    /// Records skipped for a blank name or id
    pub skipped: usize,
}

/// Search the library visible to the caller
///
/// # Errors
///
/// Returns a database error if the query fails
pub async fn list_exercises(database: &Database, caller: &AuthResult, query: ExerciseQuery) -> AppResult<Vec<Exercise>> {
    database
        .list_exercises(caller.scope(), &query.into_filter())
        .await
}

/// Add a custom exercise to the caller's gym
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients and `MISSING_REQUIRED_FIELD` for a
/// blank name
pub async fn create_exercise(
    database: &Database,
    caller: &AuthResult,
    request: CreateExerciseRequest,
) -> AppResult<Exercise> {
    caller.require_staff()?;

    let exercise = database
        .create_exercise(&NewExercise {
            name: required(request.name, "Exercise name")?,
            instructions: clean(request.instructions),
            category: clean(request.category),
            primary_muscle: clean(request.primary_muscle),
            equipment: clean(request.equipment),
            source: ExerciseSource::Custom,
            gym_id: caller.gym_id,
            created_by_id: Some(caller.user_id),
            ..NewExercise::default()
        })
        .await?;

    info!(exercise_id = %exercise.id, name = %exercise.name, by = %caller.user_id, "Custom exercise created");
    Ok(exercise)
}

/// Upsert records of the free exercise database as global exercises
///
/// # Errors
///
/// Returns a database error if an upsert fails; earlier records stay imported
pub async fn import_exercises(database: &Database, records: Vec<ImportedExercise>) -> AppResult<ImportReport> {
    let mut report = ImportReport::default();
    for record in records {
        if record.name.trim().is_empty() || record.id.trim().is_empty() {
            warn!(id = %record.id, "Skipping exercise without name or id");
            report.skipped += 1;
            continue;
        }
        if database
            .upsert_imported_exercise(&record.into_new_exercise())
            .await?
        {
            report.inserted += 1;
        } else {
            report.updated += 1;
        }
    }
    info!(
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped,
        "Exercise import complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_blank_mean_no_filter() {
        let filter = ExerciseQuery {
            search: Some("  ".into()),
            category: Some("all".into()),
            primary_muscle: Some("ALL".into()),
            equipment: Some(" barbell ".into()),
        }
        .into_filter();

        assert_eq!(filter.search, None);
        assert_eq!(filter.category, None);
        assert_eq!(filter.primary_muscle, None);
        assert_eq!(filter.equipment.as_deref(), Some("barbell"));
    }
}
