// ABOUTME: Login and session business logic
// ABOUTME: Credential checks, token issuance, and the session view with its navigation menu
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::{verify_password, AuthManager, AuthResult};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::GymId;
use crate::permissions::{menu_for, MenuItem, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// The authenticated user as shown to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    /// User id
    pub id: Uuid,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: UserRole,
    /// Gym id
    pub gym_id: Option<GymId>,
    /// Gym slug
    pub gym_slug: Option<String>,
    /// Gym name
    pub gym_name: Option<String>,
}

impl From<&AuthResult> for SessionUser {
    fn from(auth: &AuthResult) -> Self {
        Self {
            id: auth.user_id,
            email: auth.email.clone(),
            name: auth.name.clone(),
            role: auth.role,
            gym_id: auth.gym_id,
            gym_slug: auth.gym_slug.clone(),
            gym_name: auth.gym_name.clone(),
        }
    }
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Signed JWT
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
    /// The logged-in user
    pub user: SessionUser,
}

/// Session view: who is logged in and what they can navigate to
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// The logged-in user
    pub user: SessionUser,
    /// Navigation entries for the role
    pub menu: Vec<MenuItem>,
}

/// Check credentials and issue a token
///
/// Unknown emails and wrong passwords produce the same error.
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` for a blank email or password and
/// `AUTH_INVALID` for bad credentials or a former member
pub async fn login(
    database: &Database,
    auth_manager: &AuthManager,
    request: LoginRequest,
) -> AppResult<LoginOutcome> {
    let email = super::required(request.email, "Email")?.to_lowercase();
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("Password"))?;

    let Some(user) = database.get_user_by_email(&email).await? else {
        AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
    };

    if !verify_password(&password, &user.password_hash).await? {
        AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
    }

    if !user.is_active() {
        AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("former member"));
        return Err(AppError::auth_invalid("This account is no longer active"));
    }

    let gym = match user.gym_id {
        Some(gym_id) => database.get_gym(gym_id).await?,
        None => None,
    };

    let token = auth_manager.generate_token(&user, gym.as_ref())?;
    AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

    Ok(LoginOutcome {
        token,
        expires_at: auth_manager.expiry_from_now(),
        user: SessionUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            gym_id: gym.as_ref().map(|g| g.id),
            gym_slug: gym.as_ref().map(|g| g.slug.clone()),
            gym_name: gym.map(|g| g.name),
        },
    })
}

/// Session view for an authenticated caller
#[must_use]
pub fn session(auth: &AuthResult) -> SessionView {
    SessionView {
        user: SessionUser::from(auth),
        menu: menu_for(auth.role),
    }
}
