// ABOUTME: User management database operations
// ABOUTME: Account creation, lookup, profile updates, membership status, and scoped listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{parse_gym_id, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{GymScope, User, UserStatus};
use crate::permissions::UserRole;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, name, password_hash, role, status, gym_id, created_at";

/// Fields changed by a profile update; `None` leaves the column alone
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name
    pub name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New bcrypt hash
    pub password_hash: Option<String>,
}

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'CLIENT'
                    CHECK (role IN ('CLIENT', 'TRAINER', 'GYM_ADMIN', 'ADMIN')),
                status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'FORMER')),
                gym_id TEXT REFERENCES gyms(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_gym ON users(gym_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create users index: {e}")))?;
        Ok(())
    }

    /// Insert a user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email is taken
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, name, password_hash, role, status, gym_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.status.as_str())
        .bind(user.gym_id.map(|g| g.to_string()))
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            err if err.code == crate::errors::ErrorCode::ResourceAlreadyExists => {
                AppError::already_exists(format!("A user with email {} already exists", user.email))
            }
            err => err,
        })?;
        Ok(user.id)
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch user: {e}")))?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Fetch a user by email (exact match on the normalized address)
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch user by email: {e}")))?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Apply a profile update
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown users and
    /// `RESOURCE_ALREADY_EXISTS` for a taken email
    pub async fn update_user(&self, user_id: Uuid, update: &UserUpdate) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password_hash = COALESCE(?, password_hash)
            WHERE id = ?
            ",
        )
        .bind(&update.name)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id}")));
        }
        Ok(())
    }

    /// Change membership status
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for unknown users
    pub async fn set_user_status(&self, user_id: Uuid, status: UserStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {user_id}")));
        }
        Ok(())
    }

    /// Users in scope with one of `roles`, ordered by name
    ///
    /// An empty `roles` slice means every role.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list_users(
        &self,
        scope: GymScope,
        roles: &[UserRole],
        include_former: bool,
    ) -> AppResult<Vec<User>> {
        let role_filter = if roles.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; roles.len()].join(", ");
            format!("AND role IN ({placeholders})")
        };
        let status_filter = if include_former {
            ""
        } else {
            "AND status = 'ACTIVE'"
        };

        let sql = format!(
            r"
            SELECT {USER_COLUMNS} FROM users
            WHERE (? OR gym_id IS ?)
            {role_filter}
            {status_filter}
            ORDER BY name COLLATE NOCASE ASC
            "
        );

        let mut query = sqlx::query(&sql)
            .bind(scope.unrestricted)
            .bind(scope.gym_param());
        for role in roles {
            query = query.bind(role.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;
        rows.iter().map(row_to_user).collect()
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let role: String = row.get("role");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");

    Ok(User {
        id: parse_uuid(&id)?,
        email: row.get("email"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        role: role
            .parse::<UserRole>()
            .map_err(|e| AppError::internal(format!("Invalid role in database: {e}")))?,
        status: UserStatus::parse(&status),
        gym_id: parse_gym_id(row.get("gym_id"))?,
        created_at: parse_timestamp(&created_at)?,
    })
}
