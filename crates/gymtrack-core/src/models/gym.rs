// ABOUTME: Gym tenant models
// ABOUTME: GymId newtype, Gym record, and GymScope row visibility for multi-tenancy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::permissions::UserRole;

/// Type-safe wrapper for gym identifiers
///
/// Provides compile-time distinction between gym IDs and other UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GymId(pub Uuid);

impl GymId {
    /// Create a new random `GymId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GymId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GymId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for GymId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GymId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A gym: the tenant boundary for users, workouts, and custom exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gym {
    /// Unique gym identifier
    pub id: GymId,
    /// Display name
    pub name: String,
    /// URL-safe slug
    pub slug: String,
    /// Logo as URL or `data:` URL
    pub logo: Option<String>,
    /// When the gym was created
    pub created_at: DateTime<Utc>,
}

impl Gym {
    /// Creates a new gym
    #[must_use]
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: GymId::new(),
            name,
            slug,
            logo: None,
            created_at: Utc::now(),
        }
    }

    /// Whether `slug` is lowercase ascii letters, digits, and inner dashes
    #[must_use]
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

/// Which gym rows a caller may see
///
/// `ADMIN` is unrestricted. Everybody else sees rows whose `gym_id` equals
/// their own, where a missing gym only matches rows without a gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GymScope {
    /// Gym of the caller
    pub gym_id: Option<GymId>,
    /// Bypass gym filtering
    pub unrestricted: bool,
}

impl GymScope {
    /// Scope for a user with `role` belonging to `gym_id`
    #[must_use]
    pub const fn for_user(role: UserRole, gym_id: Option<GymId>) -> Self {
        Self {
            gym_id,
            unrestricted: role.is_unrestricted(),
        }
    }

    /// Scope that sees everything (admin tooling)
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            gym_id: None,
            unrestricted: true,
        }
    }

    /// Whether a row belonging to `row_gym` is visible
    #[must_use]
    pub fn allows(&self, row_gym: Option<GymId>) -> bool {
        self.unrestricted || self.gym_id == row_gym
    }

    /// Gym id as bound into SQL (`gym_id IS ?`)
    #[must_use]
    pub fn gym_param(&self) -> Option<String> {
        self.gym_id.map(|id| id.to_string())
    }
}
