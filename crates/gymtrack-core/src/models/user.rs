// ABOUTME: User account models
// ABOUTME: User record, ACTIVE/FORMER membership status, and lightweight user summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GymId;
use crate::permissions::UserRole;

/// Membership status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Current member
    #[default]
    Active,
    /// Left the gym; kept for workout history
    Former,
}

impl UserStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Former => "FORMER",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "FORMER" => Self::Former,
            _ => Self::Active,
        }
    }
}

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login email, unique across the platform
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role of the account
    pub role: UserRole,
    /// Membership status
    pub status: UserStatus,
    /// Gym the user belongs to
    pub gym_id: Option<GymId>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    #[must_use]
    pub fn new(
        email: String,
        name: String,
        password_hash: String,
        role: UserRole,
        gym_id: Option<GymId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            role,
            status: UserStatus::Active,
            gym_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the user is a current member
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Public projection of the user
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Minimal user projection used in lists and joins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
}
