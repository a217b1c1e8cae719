// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Permission checks, gym scoping, validation, and lock rules shared by routes and the admin CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers parse requests and shape responses; everything that decides
//! whether a caller may do something, or what a valid input is, lives here so
//! the admin CLI and the HTTP API apply the same rules.

/// Login and session projection
pub mod auth;

/// Exercise library search, creation, and bulk import
pub mod exercises;

/// Gym branding, settings, and creation
pub mod gyms;

/// Home page assembly for clients and staff
pub mod home;

/// Progress chart data
pub mod progress;

/// Account management within a gym
pub mod users;

/// Workout building, logging, and completion
pub mod workouts;

use crate::errors::{AppError, AppResult};

/// Trim an optional string and drop it when empty
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Trim a required string
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` when the value is absent or blank
pub(crate) fn required(value: Option<String>, field: &str) -> AppResult<String> {
    clean(value).ok_or_else(|| AppError::missing_field(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_trims_and_drops_blank() {
        assert_eq!(clean(Some("  Squat ".into())), Some("Squat".into()));
        assert_eq!(clean(Some("   ".into())), None);
        assert_eq!(clean(None), None);
    }

    #[test]
    fn test_required_reports_field() {
        let err = required(Some(String::new()), "Name").unwrap_err();
        assert_eq!(err.message, "Name is required");
    }
}
