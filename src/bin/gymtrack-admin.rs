// ABOUTME: Administrative CLI for GymTrack maintenance tasks
// ABOUTME: Demo seeding, exercise dataset import, default-gym migration, and admin account creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Reset and load the demo gym
//! gymtrack-admin seed-demo
//!
//! # Import the free exercise database export
//! gymtrack-admin import-exercises --file exercises.json
//!
//! # Move pre-tenancy rows into the default gym
//! gymtrack-admin migrate-default-gym
//!
//! # Create a platform administrator
//! gymtrack-admin create-admin --email admin@example.com --password s3cretpass
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gymtrack_server::{
    auth::hash_password,
    config::ServerConfig,
    constants::seed::DEMO_PASSWORD,
    database::Database,
    logging,
    models::{ImportedExercise, User},
    permissions::UserRole,
    services::{exercises::import_exercises, users},
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "gymtrack-admin",
    about = "GymTrack maintenance commands",
    long_about = "Seed demo data, import the exercise library, migrate legacy rows, and create administrators."
)]
struct AdminArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Reset gym data and load the demo gym
    SeedDemo,

    /// Import exercises from a JSON export
    ImportExercises {
        /// Path to the JSON array of exercises
        #[arg(long)]
        file: PathBuf,
    },

    /// Attach rows without a gym to the default gym
    MigrateDefaultGym,

    /// Create a platform administrator
    CreateAdmin {
        /// Login email
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long, default_value = "Administrator")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminArgs::parse();
    logging::init_from_env()?;

    let database_url = match args.database_url {
        Some(url) => url,
        None => ServerConfig::from_env()?.database.url,
    };
    let database = Database::new(&database_url).await?;

    match args.command {
        AdminCommand::SeedDemo => seed_demo(&database).await,
        AdminCommand::ImportExercises { file } => import(&database, &file).await,
        AdminCommand::MigrateDefaultGym => {
            let report = database.assign_default_gym().await?;
            info!(
                gym_created = report.gym_created,
                users = report.users,
                workouts = report.workouts,
                custom_exercises = report.custom_exercises,
                imported_exercises = report.imported_exercises,
                "Default gym migration finished"
            );
            Ok(())
        }
        AdminCommand::CreateAdmin {
            email,
            password,
            name,
        } => create_admin(&database, &email, &password, &name).await,
    }
}

async fn seed_demo(database: &Database) -> Result<()> {
    let password_hash = hash_password(DEMO_PASSWORD).await?;
    let report = database
        .seed_demo(&password_hash, Utc::now().date_naive())
        .await?;
    info!(
        gym = %report.gym_slug,
        users = report.users,
        exercises = report.exercises,
        workouts = report.workouts,
        "Demo data loaded; every account uses password '{DEMO_PASSWORD}'"
    );
    Ok(())
}

async fn import(database: &Database, file: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<ImportedExercise> =
        serde_json::from_str(&raw).context("Exercise file is not a JSON array of exercises")?;

    info!("Importing {} exercise records", records.len());
    let report = import_exercises(database, records).await?;
    info!(
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped,
        "Exercise import finished"
    );
    Ok(())
}

async fn create_admin(database: &Database, email: &str, password: &str, name: &str) -> Result<()> {
    let email = users::normalize_email(email)?;
    users::check_password(password)?;

    if database.get_user_by_email(&email).await?.is_some() {
        anyhow::bail!("A user with email {email} already exists");
    }

    let password_hash = hash_password(password).await?;
    let user = User::new(email.clone(), name.trim().to_owned(), password_hash, UserRole::Admin, None);
    let user_id = database.create_user(&user).await?;
    info!(user_id = %user_id, "Administrator {email} created");
    Ok(())
}
