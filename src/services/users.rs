// ABOUTME: Account management business logic within a gym
// ABOUTME: Staff-only creation and edits, role ceilings, former/reactivate, and roster listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{clean, required};
use crate::auth::{hash_password, AuthResult};
use crate::constants::auth::MIN_PASSWORD_LENGTH;
use crate::database::{Database, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{User, UserStatus};
use crate::permissions::UserRole;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// New account form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    /// Display name
    pub name: Option<String>,
    /// Email
    pub email: Option<String>,
    /// Initial password
    pub password: Option<String>,
    /// Role, `CLIENT` when omitted
    pub role: Option<UserRole>,
}

/// Profile edit form; blank fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// Display name
    pub name: Option<String>,
    /// Email
    pub email: Option<String>,
    /// New password
    pub password: Option<String>,
}

/// Lowercase and trim an email, rejecting obviously malformed ones
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when the address has no `@` or no domain
pub fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::invalid_format(format!("Invalid email address: {email}"))),
    }
}

/// Enforce the minimum password length
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a short password
pub fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Load a user the caller may manage
async fn load_managed_user(database: &Database, caller: &AuthResult, user_id: Uuid) -> AppResult<User> {
    let user = database
        .get_user(user_id)
        .await?
        .filter(|u| caller.scope().allows(u.gym_id))
        .ok_or_else(|| AppError::not_found("User"))?;

    if !caller.role.can_assign(user.role) {
        AppLogger::log_security_event(
            "user_edit_denied",
            &format!("target role {} above caller", user.role),
            Some(&caller.user_id.to_string()),
        );
        return Err(AppError::forbidden("You cannot manage a user with a higher role"));
    }
    Ok(user)
}

/// Create an account in the caller's gym
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients or a role above the caller's,
/// `MISSING_REQUIRED_FIELD` for blank fields, and `RESOURCE_ALREADY_EXISTS`
/// for a taken email
pub async fn create_user(
    database: &Database,
    caller: &AuthResult,
    request: CreateUserRequest,
) -> AppResult<User> {
    caller.require_staff()?;

    let name = required(request.name, "Name")?;
    let email = normalize_email(&required(request.email, "Email")?)?;
    let password = required(request.password, "Password")?;
    check_password(&password)?;

    let role = request.role.unwrap_or(UserRole::Client);
    if !caller.role.can_assign(role) {
        return Err(AppError::forbidden(format!("You cannot create a {role} account")));
    }

    let password_hash = hash_password(&password).await?;
    let user = User::new(email, name, password_hash, role, caller.gym_id);
    database.create_user(&user).await?;

    info!(user_id = %user.id, role = %role, created_by = %caller.user_id, "User created");
    Ok(user)
}

/// Edit a user's name, email, or password
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` outside the caller's gym and
/// `RESOURCE_ALREADY_EXISTS` for a taken email
pub async fn update_user(
    database: &Database,
    caller: &AuthResult,
    user_id: Uuid,
    request: UpdateUserRequest,
) -> AppResult<User> {
    caller.require_staff()?;
    load_managed_user(database, caller, user_id).await?;

    let email = clean(request.email).map(|e| normalize_email(&e)).transpose()?;
    let password_hash = match request.password.filter(|p| !p.is_empty()) {
        Some(password) => {
            check_password(&password)?;
            Some(hash_password(&password).await?)
        }
        None => None,
    };

    let update = UserUpdate {
        name: clean(request.name),
        email,
        password_hash,
    };
    database.update_user(user_id, &update).await?;

    database
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))
}

/// Mark a member as former; they keep their history but cannot log in
///
/// # Errors
///
/// Returns `INVALID_INPUT` when callers target themselves
pub async fn mark_former(database: &Database, caller: &AuthResult, user_id: Uuid) -> AppResult<()> {
    caller.require_staff()?;
    if caller.user_id == user_id {
        return Err(AppError::invalid_input("You cannot mark yourself as former"));
    }
    load_managed_user(database, caller, user_id).await?;
    database.set_user_status(user_id, UserStatus::Former).await?;
    info!(user_id = %user_id, by = %caller.user_id, "User marked former");
    Ok(())
}

/// Bring a former member back
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` outside the caller's gym
pub async fn reactivate(database: &Database, caller: &AuthResult, user_id: Uuid) -> AppResult<()> {
    caller.require_staff()?;
    load_managed_user(database, caller, user_id).await?;
    database.set_user_status(user_id, UserStatus::Active).await?;
    info!(user_id = %user_id, by = %caller.user_id, "User reactivated");
    Ok(())
}

/// Clients of the caller's gym by name
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients
pub async fn list_clients(database: &Database, caller: &AuthResult, show_former: bool) -> AppResult<Vec<User>> {
    caller.require_staff()?;
    database
        .list_users(caller.scope(), &[UserRole::Client], show_former)
        .await
}

/// Staff of the caller's gym by name
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients
pub async fn list_trainers(database: &Database, caller: &AuthResult, show_former: bool) -> AppResult<Vec<User>> {
    caller.require_staff()?;
    database
        .list_users(caller.scope(), &UserRole::staff_roles(), show_former)
        .await
}

/// Everyone in the caller's gym by name
///
/// # Errors
///
/// Returns `PERMISSION_DENIED` for clients
pub async fn list_users(database: &Database, caller: &AuthResult) -> AppResult<Vec<User>> {
    caller.require_staff()?;
    database.list_users(caller.scope(), &[], true).await
}
