// ABOUTME: Workout session models and the structural transformations over them
// ABOUTME: Sessions, sets, set-exercises, round grouping, structure copying, and summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use super::GymId;
use crate::constants::limits::SUMMARY_EXERCISE_NAMES;

/// Lifecycle of a workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutStatus {
    /// Being planned or performed
    #[default]
    InProgress,
    /// Finished; structure is frozen
    Completed,
}

impl WorkoutStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "COMPLETED" => Self::Completed,
            _ => Self::InProgress,
        }
    }
}

/// A workout session for one client on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique identifier
    pub id: Uuid,
    /// Training day
    pub date: NaiveDate,
    /// Client performing the workout
    pub client_id: Uuid,
    /// Trainer running it, if any
    pub trainer_id: Option<Uuid>,
    /// Gym the session belongs to
    pub gym_id: Option<GymId>,
    /// Lifecycle status
    pub status: WorkoutStatus,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// Create a new in-progress session
    #[must_use]
    pub fn new(
        date: NaiveDate,
        client_id: Uuid,
        trainer_id: Option<Uuid>,
        gym_id: Option<GymId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            client_id,
            trainer_id,
            gym_id,
            status: WorkoutStatus::InProgress,
            created_at: Utc::now(),
        }
    }

    /// Whether the structure may still change
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status == WorkoutStatus::InProgress
    }
}

/// Planned values for one round of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Targets {
    /// Target repetitions
    pub target_reps: Option<i32>,
    /// Target weight
    pub target_weight: Option<f64>,
    /// Target duration in seconds
    pub target_duration: Option<i32>,
}

/// One round of one exercise inside a set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExercise {
    /// Unique identifier
    pub id: Uuid,
    /// Parent set
    pub workout_set_id: Uuid,
    /// Library exercise
    pub exercise_id: Uuid,
    /// Library exercise name (joined for display)
    pub exercise_name: Option<String>,
    /// Position of the exercise within the set
    pub order: i32,
    /// Round number, starting at 1
    pub round: i32,
    /// Free-form variation ("tempo 3-1-1", "each side")
    pub modifier: Option<String>,
    /// Planned values
    #[serde(flatten)]
    pub targets: Targets,
    /// Performed repetitions
    pub actual_reps: Option<i32>,
    /// Performed weight
    pub actual_weight: Option<f64>,
    /// Performed duration in seconds
    pub actual_duration: Option<i32>,
    /// Notes on the performance
    pub notes: Option<String>,
    /// Marked done
    pub completed: bool,
}

/// A numbered block of exercises inside a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Unique identifier
    pub id: Uuid,
    /// Parent session
    pub workout_session_id: Uuid,
    /// Position within the session, starting at 1
    pub order: i32,
    /// Notes for the whole set
    pub notes: Option<String>,
    /// Rows ordered by (order, round)
    pub exercises: Vec<SetExercise>,
}

/// All rounds of one exercise at one position of a set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseGroup {
    /// Library exercise
    pub exercise_id: Uuid,
    /// Library exercise name
    pub exercise_name: Option<String>,
    /// Position within the set
    pub order: i32,
    /// Rounds ordered by round number
    pub rounds: Vec<SetExercise>,
}

impl ExerciseGroup {
    /// Number of rounds in the group
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Modifier shared by the group (taken from the first round)
    #[must_use]
    pub fn modifier(&self) -> Option<&str> {
        self.rounds.first().and_then(|r| r.modifier.as_deref())
    }
}

/// Group the rows of a set into rounds keyed by (order, exercise)
///
/// Groups come out ordered by position; rounds inside a group by round number.
#[must_use]
pub fn group_rounds(rows: &[SetExercise]) -> Vec<ExerciseGroup> {
    let mut groups: BTreeMap<(i32, Uuid), Vec<SetExercise>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.order, row.exercise_id))
            .or_default()
            .push(row.clone());
    }

    groups
        .into_iter()
        .map(|((order, exercise_id), mut rounds)| {
            rounds.sort_by_key(|r| r.round);
            let exercise_name = rounds.iter().find_map(|r| r.exercise_name.clone());
            ExerciseGroup {
                exercise_id,
                exercise_name,
                order,
                rounds,
            }
        })
        .collect()
}

/// Structure of a set-exercise to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct SetExerciseDraft {
    /// Library exercise
    pub exercise_id: Uuid,
    /// Position within the set
    pub order: i32,
    /// Round number
    pub round: i32,
    /// Variation
    pub modifier: Option<String>,
    /// Planned values
    pub targets: Targets,
}

/// Structure of a set to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSetDraft {
    /// Position within the session
    pub order: i32,
    /// Notes for the set
    pub notes: Option<String>,
    /// Rows to insert
    pub exercises: Vec<SetExerciseDraft>,
}

/// Copy the structure of a previous workout
///
/// Sets keep their order and notes; every round keeps exercise, position,
/// modifier, and targets. Actuals, per-round notes, and completion are left
/// for the new session to fill in.
#[must_use]
pub fn copy_structure(sets: &[WorkoutSet]) -> Vec<WorkoutSetDraft> {
    let mut drafts: Vec<WorkoutSetDraft> = sets
        .iter()
        .map(|set| {
            let mut exercises: Vec<SetExerciseDraft> = set
                .exercises
                .iter()
                .map(|row| SetExerciseDraft {
                    exercise_id: row.exercise_id,
                    order: row.order,
                    round: row.round,
                    modifier: row.modifier.clone(),
                    targets: row.targets,
                })
                .collect();
            exercises.sort_by_key(|e| (e.order, e.round));
            WorkoutSetDraft {
                order: set.order,
                notes: set.notes.clone(),
                exercises,
            }
        })
        .collect();
    drafts.sort_by_key(|s| s.order);
    drafts
}

/// One-line description of a workout for copy-source pickers
///
/// `2025-03-14 - Bench Press, Squat, Deadlift +2 more`
pub fn summarize_workout<'a>(date: NaiveDate, exercise_names: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen = HashSet::new();
    let distinct: Vec<&str> = exercise_names
        .into_iter()
        .filter(|name| seen.insert(*name))
        .collect();

    let shown = distinct
        .iter()
        .take(SUMMARY_EXERCISE_NAMES)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    let more = distinct.len().saturating_sub(SUMMARY_EXERCISE_NAMES);

    if more > 0 {
        format!("{} - {shown} +{more} more", date.format("%Y-%m-%d"))
    } else {
        format!("{} - {shown}", date.format("%Y-%m-%d"))
    }
}
