// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Exercise vocabularies, list limits, auth defaults, and server defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Canonical exercise vocabularies offered by the exercise form
pub mod exercise_vocabulary {
    /// Exercise categories
    pub const CATEGORIES: &[&str] = &[
        "strength",
        "stretching",
        "plyometrics",
        "strongman",
        "powerlifting",
        "cardio",
        "olympic weightlifting",
    ];

    /// Primary muscle groups
    pub const PRIMARY_MUSCLES: &[&str] = &[
        "abdominals",
        "abductors",
        "adductors",
        "biceps",
        "calves",
        "chest",
        "forearms",
        "glutes",
        "hamstrings",
        "lats",
        "lower back",
        "middle back",
        "neck",
        "quadriceps",
        "shoulders",
        "traps",
        "triceps",
    ];

    /// Equipment
    pub const EQUIPMENT: &[&str] = &[
        "barbell",
        "dumbbell",
        "cable",
        "machine",
        "kettlebells",
        "bands",
        "medicine ball",
        "exercise ball",
        "foam roll",
        "e-z curl bar",
        "body only",
        "other",
    ];

    /// Filter value meaning "no filter"
    pub const FILTER_ALL: &str = "all";

    /// Base URL for images of the imported free exercise database
    pub const IMPORTED_IMAGE_BASE_URL: &str =
        "https://raw.githubusercontent.com/yuhonas/free-exercise-db/main/exercises";
}

/// Result size limits
pub mod limits {
    /// Exercises returned by a library search
    pub const EXERCISE_SEARCH_LIMIT: i64 = 50;
    /// Exercises offered in the workout editor picker
    pub const EXERCISE_PICKER_LIMIT: i64 = 100;
    /// Workouts in the workout list
    pub const WORKOUT_LIST_LIMIT: i64 = 20;
    /// Completed workouts offered as a copy source
    pub const RECENT_WORKOUTS_LIMIT: i64 = 10;
    /// Workouts per section of the client home page
    pub const HOME_SECTION_LIMIT: i64 = 10;
    /// Distinct exercise names in a workout summary line
    pub const SUMMARY_EXERCISE_NAMES: usize = 3;
    /// Largest logo upload accepted (bytes)
    pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;
    /// Most rounds created by a single add-exercise call
    pub const MAX_ROUNDS_PER_ADD: i32 = 50;
}

/// Authentication defaults
pub mod auth {
    /// bcrypt cost factor for stored passwords
    pub const BCRYPT_COST: u32 = 10;
    /// Default JWT lifetime
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24 * 30;
    /// Audience claim of issued tokens
    pub const JWT_AUDIENCE: &str = "gymtrack";
    /// Cookie carrying the session token
    pub const AUTH_COOKIE_NAME: &str = "auth_token";
    /// Minimum password length for new accounts
    pub const MIN_PASSWORD_LENGTH: usize = 8;
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// Service names for logging
pub mod service_names {
    /// Main server
    pub const GYMTRACK_SERVER: &str = "gymtrack-server";
}

/// Seed and migration values
pub mod seed {
    /// Slug of the gym created by the default-gym migration
    pub const DEFAULT_GYM_SLUG: &str = "default";
    /// Name of the gym created by the default-gym migration
    pub const DEFAULT_GYM_NAME: &str = "Default Gym";
    /// Password given to every demo account
    pub const DEMO_PASSWORD: &str = "password123";
}
