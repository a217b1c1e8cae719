// ABOUTME: Home page assembly
// ABOUTME: Upcoming and past workouts for clients, roster data for staff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthResult;
use crate::constants::limits::HOME_SECTION_LIMIT;
use crate::database::{Database, WorkoutListItem};
use crate::errors::AppResult;
use crate::models::UserSummary;
use crate::permissions::UserRole;
use chrono::NaiveDate;
use serde::Serialize;

/// Home page content, by role
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum HomeView {
    /// What a client sees
    Client {
        /// In-progress workouts dated today or later, soonest first
        upcoming: Vec<WorkoutListItem>,
        /// Completed or past-dated workouts, newest first
        past: Vec<WorkoutListItem>,
    },
    /// What staff see: the new-workout form choices
    Staff {
        /// Active clients by name
        clients: Vec<UserSummary>,
        /// Active trainers by name
        trainers: Vec<UserSummary>,
    },
}

/// Build the home page for the caller
///
/// # Errors
///
/// Returns a database error if a query fails
pub async fn home(database: &Database, caller: &AuthResult, today: NaiveDate) -> AppResult<HomeView> {
    if caller.is_staff() {
        trainer_home(database, caller).await
    } else {
        client_home(database, caller, today).await
    }
}

async fn client_home(database: &Database, caller: &AuthResult, today: NaiveDate) -> AppResult<HomeView> {
    let upcoming = database
        .upcoming_workouts(caller.user_id, today, HOME_SECTION_LIMIT)
        .await?;
    let past = database
        .past_workouts(caller.user_id, today, HOME_SECTION_LIMIT)
        .await?;
    Ok(HomeView::Client { upcoming, past })
}

async fn trainer_home(database: &Database, caller: &AuthResult) -> AppResult<HomeView> {
    let scope = caller.scope();
    let clients = database
        .list_users(scope, &[UserRole::Client], false)
        .await?
        .iter()
        .map(crate::models::User::summary)
        .collect();
    let trainers = database
        .list_users(scope, &UserRole::staff_roles(), false)
        .await?
        .iter()
        .map(crate::models::User::summary)
        .collect();
    Ok(HomeView::Staff { clients, trainers })
}
