// ABOUTME: Demo data reset used by the admin CLI
// ABOUTME: Wipes gym-scoped data and recreates a demo gym with staff, clients, exercises, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::AppResult;
use crate::models::{
    Gym, NewExercise, SetExerciseDraft, Targets, User, WorkoutSession, WorkoutSetDraft,
    WorkoutStatus,
};
use crate::permissions::UserRole;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

const DEMO_GYM_SLUG: &str = "demo";

/// (name, category, primary muscle, equipment, starting weight, weekly increment)
const DEMO_EXERCISES: &[(&str, &str, &str, &str, f64, f64)] = &[
    ("Bench Press", "strength", "chest", "barbell", 60.0, 2.5),
    ("Barbell Squat", "strength", "quadriceps", "barbell", 80.0, 5.0),
    ("Deadlift", "strength", "lower back", "barbell", 100.0, 5.0),
    ("Shoulder Press", "strength", "shoulders", "dumbbell", 16.0, 1.0),
    ("Lat Pulldown", "strength", "lats", "cable", 45.0, 2.5),
    ("Bicep Curl", "strength", "biceps", "dumbbell", 10.0, 1.0),
    ("Tricep Extension", "strength", "triceps", "dumbbell", 12.0, 1.0),
    ("Plank", "strength", "abdominals", "body only", 0.0, 0.0),
];

/// Weeks of completed history per client
const HISTORY_WEEKS: u64 = 6;

/// What [`Database::seed_demo`] created
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// The demo gym
    pub gym_slug: String,
    /// Accounts created
    pub users: usize,
    /// Exercises created
    pub exercises: usize,
    /// Workout sessions created
    pub workouts: usize,
}

impl Database {
    /// Reset gym-scoped data and load a demo gym
    ///
    /// Every account shares `password_hash`. Admin accounts and imported
    /// exercises survive the reset.
    ///
    /// # Errors
    ///
    /// Returns a database error if any statement fails
    pub async fn seed_demo(&self, password_hash: &str, today: NaiveDate) -> AppResult<SeedReport> {
        let mut tx = self.pool.begin().await?;
        for statement in [
            "DELETE FROM set_exercises",
            "DELETE FROM workout_sets",
            "DELETE FROM workout_sessions",
            "DELETE FROM exercises WHERE source = 'CUSTOM'",
            "DELETE FROM users WHERE role != 'ADMIN'",
            "DELETE FROM gyms WHERE slug = 'demo'",
        ] {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Cleared workout data, custom exercises, and non-admin users");

        let gym = Gym::new("Demo Gym".to_owned(), DEMO_GYM_SLUG.to_owned());
        self.create_gym(&gym).await?;

        let account = |email: &str, name: &str, role| {
            User::new(
                email.to_owned(),
                name.to_owned(),
                password_hash.to_owned(),
                role,
                Some(gym.id),
            )
        };
        let owner = account("owner@example.com", "Morgan Lee", UserRole::GymAdmin);
        let trainers = [
            account("jon@example.com", "Jon K", UserRole::Trainer),
            account("thomas@example.com", "Thomas K", UserRole::Trainer),
        ];
        let clients = [
            account("brendan@example.com", "Brendan Brothers", UserRole::Client),
            account("erin@example.com", "Erin Brothers", UserRole::Client),
        ];

        self.create_user(&owner).await?;
        for user in trainers.iter().chain(&clients) {
            self.create_user(user).await?;
        }

        let mut exercises = Vec::with_capacity(DEMO_EXERCISES.len());
        for &(name, category, muscle, equipment, base, step) in DEMO_EXERCISES {
            let created = self
                .create_exercise(&NewExercise {
                    name: name.to_owned(),
                    category: Some(category.to_owned()),
                    primary_muscle: Some(muscle.to_owned()),
                    equipment: Some(equipment.to_owned()),
                    gym_id: Some(gym.id),
                    created_by_id: Some(trainers[0].id),
                    ..NewExercise::default()
                })
                .await?;
            exercises.push((created.id, base, step));
        }

        let mut workouts = 0;
        for (index, client) in clients.iter().enumerate() {
            let trainer = &trainers[index % trainers.len()];
            for week in 0..HISTORY_WEEKS {
                let date = today
                    .checked_sub_days(Days::new((HISTORY_WEEKS - week) * 7))
                    .unwrap_or(today);
                let session =
                    WorkoutSession::new(date, client.id, Some(trainer.id), Some(gym.id));
                self.create_workout(&session, &demo_structure(&exercises, week))
                    .await?;
                self.complete_with_targets(session.id).await?;
                workouts += 1;
            }

            let upcoming = WorkoutSession::new(today, client.id, Some(trainer.id), Some(gym.id));
            self.create_workout(&upcoming, &demo_structure(&exercises, HISTORY_WEEKS))
                .await?;
            workouts += 1;
        }

        let report = SeedReport {
            gym_slug: gym.slug,
            users: 1 + trainers.len() + clients.len(),
            exercises: exercises.len(),
            workouts,
        };
        info!(
            users = report.users,
            exercises = report.exercises,
            workouts = report.workouts,
            "Demo data loaded"
        );
        Ok(report)
    }

    /// Copy targets into actuals, mark every round done, and close the session
    async fn complete_with_targets(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE set_exercises
            SET actual_reps = target_reps, actual_weight = target_weight,
                actual_duration = target_duration, completed = 1
            WHERE workout_set_id IN (SELECT id FROM workout_sets WHERE workout_session_id = ?)
            ",
        )
        .bind(session_id.to_string())
        .execute(&self.pool)
        .await?;
        self.update_workout_status(session_id, WorkoutStatus::Completed)
            .await
    }
}

/// Two supersets per session, rotating through the library, heavier every week
fn demo_structure(exercises: &[(Uuid, f64, f64)], week: u64) -> Vec<WorkoutSetDraft> {
    let offset = usize::try_from(week).unwrap_or(0) % 2 * 4;
    (0..2)
        .map(|set| {
            let drafts = (0..2)
                .flat_map(|slot| {
                    let (exercise_id, base, step) = exercises[(offset + set * 2 + slot) % exercises.len()];
                    let targets = if base > 0.0 {
                        Targets {
                            target_reps: Some(10),
                            target_weight: Some(step.mul_add(week as f64, base)),
                            target_duration: None,
                        }
                    } else {
                        Targets {
                            target_duration: Some(45),
                            ..Targets::default()
                        }
                    };
                    (1..=3).map(move |round| SetExerciseDraft {
                        exercise_id,
                        order: i32::try_from(slot).unwrap_or(0) + 1,
                        round,
                        modifier: None,
                        targets,
                    })
                })
                .collect();
            WorkoutSetDraft {
                order: i32::try_from(set).unwrap_or(0) + 1,
                notes: None,
                exercises: drafts,
            }
        })
        .collect()
}
