// ABOUTME: Core domain models for the GymTrack platform
// ABOUTME: Re-exports gym, user, exercise, workout, and progress models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models shared by the database layer, services, and routes.

mod exercise;
mod gym;
mod progress;
mod user;
mod workout;

pub use exercise::{Exercise, ExerciseCreator, ExerciseSource, ImportedExercise, NewExercise};
pub use gym::{Gym, GymId, GymScope};
pub use progress::{aggregate_progress, DateRange, ProgressPoint, ProgressSample};
pub use user::{User, UserStatus, UserSummary};
pub use workout::{
    copy_structure, group_rounds, summarize_workout, ExerciseGroup, SetExercise, SetExerciseDraft,
    Targets, WorkoutSession, WorkoutSet, WorkoutSetDraft, WorkoutStatus,
};
