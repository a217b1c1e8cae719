// ABOUTME: Gym business logic extracted from route handlers
// ABOUTME: Branding lookup, settings and logo updates for managers, and gym creation for admins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{clean, required};
use crate::auth::AuthResult;
use crate::constants::limits::MAX_LOGO_BYTES;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Gym, GymId, GymScope, UserSummary};
use crate::permissions::UserRole;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Name and logo shown in the app header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GymBranding {
    /// Gym name
    pub name: String,
    /// Logo URL or data URL
    pub logo: Option<String>,
}

/// A gym with its trainers
#[derive(Debug, Clone, Serialize)]
pub struct GymDetails {
    /// The gym
    #[serde(flatten)]
    pub gym: Gym,
    /// Active trainers by name
    pub trainers: Vec<UserSummary>,
}

/// Gym settings form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGymRequest {
    /// New name
    pub name: Option<String>,
    /// New logo; empty clears it, absent leaves it unchanged
    pub logo: Option<String>,
}

/// New gym form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGymRequest {
    /// Display name
    pub name: Option<String>,
    /// URL slug
    pub slug: Option<String>,
}

/// Branding of the caller's gym, `None` when they have no gym
///
/// # Errors
///
/// Returns a database error if the lookup fails
pub async fn branding(database: &Database, caller: &AuthResult) -> AppResult<Option<GymBranding>> {
    let Some(gym_id) = caller.gym_id else {
        return Ok(None);
    };
    Ok(database.get_gym(gym_id).await?.map(|gym| GymBranding {
        name: gym.name,
        logo: gym.logo,
    }))
}

/// A gym and its trainers
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` for unknown gyms and for gyms outside the
/// caller's scope
pub async fn get_gym(database: &Database, caller: &AuthResult, gym_id: GymId) -> AppResult<GymDetails> {
    if !caller.scope().allows(Some(gym_id)) {
        return Err(AppError::not_found("Gym"));
    }
    let gym = database
        .get_gym(gym_id)
        .await?
        .ok_or_else(|| AppError::not_found("Gym"))?;

    let gym_scope = GymScope {
        gym_id: Some(gym_id),
        unrestricted: false,
    };
    let trainers = database
        .list_users(gym_scope, &[UserRole::Trainer], false)
        .await?
        .iter()
        .map(crate::models::User::summary)
        .collect();

    Ok(GymDetails { gym, trainers })
}

fn managed_gym(caller: &AuthResult) -> AppResult<GymId> {
    caller.require_gym_manager()?;
    caller
        .gym_id
        .ok_or_else(|| AppError::invalid_input("You are not assigned to a gym"))
}

/// Rename the caller's gym and optionally change its logo
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for non-managers and `MISSING_REQUIRED_FIELD`
/// for a blank name
pub async fn update_gym(database: &Database, caller: &AuthResult, request: UpdateGymRequest) -> AppResult<Gym> {
    let gym_id = managed_gym(caller)?;
    let name = required(request.name, "Gym name")?;

    database.update_gym_name(gym_id, &name).await?;
    if let Some(logo) = request.logo {
        database
            .set_gym_logo(gym_id, clean(Some(logo)).as_deref())
            .await?;
    }
    info!(gym_id = %gym_id, by = %caller.user_id, "Gym settings updated");

    database
        .get_gym(gym_id)
        .await?
        .ok_or_else(|| AppError::not_found("Gym"))
}

/// Encode an uploaded image as a data URL
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` for an empty upload, `INVALID_FORMAT`
/// for non-image types, and `INVALID_INPUT` for oversized files
pub fn logo_data_url(bytes: &[u8], mime: &str) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::missing_field("Logo file"));
    }
    let mime = mime.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(AppError::invalid_format(format!(
            "Logo must be an image, got {mime}"
        )));
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::invalid_input(format!(
            "Logo exceeds the {MAX_LOGO_BYTES} byte limit"
        )));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Store an uploaded logo for the caller's gym
///
/// # Errors
///
/// Returns the errors of [`logo_data_url`] and `PERMISSION_DENIED` for
/// non-managers
pub async fn upload_logo(database: &Database, caller: &AuthResult, bytes: &[u8], mime: &str) -> AppResult<String> {
    let gym_id = managed_gym(caller)?;
    let logo = logo_data_url(bytes, mime)?;
    database.set_gym_logo(gym_id, Some(&logo)).await?;
    info!(gym_id = %gym_id, size = bytes.len(), "Gym logo uploaded");
    Ok(logo)
}

/// Create a gym
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for non-admins, `INVALID_FORMAT` for a bad
/// slug, and `RESOURCE_ALREADY_EXISTS` for a taken slug
pub async fn create_gym(database: &Database, caller: &AuthResult, request: CreateGymRequest) -> AppResult<Gym> {
    caller.require_admin()?;
    let name = required(request.name, "Gym name")?;
    let slug = required(request.slug, "Slug")?.to_lowercase();
    if !Gym::is_valid_slug(&slug) {
        return Err(AppError::invalid_format(
            "Slug may only contain lowercase letters, digits, and dashes",
        ));
    }
    if database.get_gym_by_slug(&slug).await?.is_some() {
        return Err(AppError::already_exists(format!("A gym with slug {slug} already exists")));
    }

    let gym = Gym::new(name, slug);
    database.create_gym(&gym).await?;
    info!(gym_id = %gym.id, slug = %gym.slug, "Gym created");
    Ok(gym)
}
