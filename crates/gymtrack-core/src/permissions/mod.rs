// ABOUTME: Role-based permission system for gym members and staff
// ABOUTME: UserRole hierarchy, permission bitflags, and navigation menus per role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Role-based permissions
//!
//! Roles form a ladder: `Client < Trainer < GymAdmin < Admin`. Each role maps
//! to a fixed set of [`Permissions`]; route handlers check flags instead of
//! comparing roles directly.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Trains at a gym, logs own workouts
    Client,
    /// Builds and runs workouts for clients
    Trainer,
    /// Manages one gym
    GymAdmin,
    /// Platform administrator, sees every gym
    Admin,
}

bitflags! {
    /// Capabilities granted to a role
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Permissions: u32 {
        /// Read own workouts and progress
        const VIEW_OWN_WORKOUTS = 1;
        /// Log actual reps / weight / duration on own workouts
        const LOG_OWN_WORKOUTS = 1 << 1;
        /// Browse the exercise library
        const VIEW_EXERCISES = 1 << 2;
        /// Read every workout in scope
        const VIEW_ALL_WORKOUTS = 1 << 3;
        /// Create and restructure workouts
        const MANAGE_WORKOUTS = 1 << 4;
        /// Add custom exercises to the library
        const MANAGE_EXERCISES = 1 << 5;
        /// Create and edit users
        const MANAGE_USERS = 1 << 6;
        /// Change gym name and logo
        const MANAGE_GYM = 1 << 7;
        /// Create gyms, cross gym boundaries
        const MANAGE_PLATFORM = 1 << 8;
    }
}

impl UserRole {
    /// Database / wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Trainer => "TRAINER",
            Self::GymAdmin => "GYM_ADMIN",
            Self::Admin => "ADMIN",
        }
    }

    /// Permissions granted to this role
    #[must_use]
    pub const fn permissions(self) -> Permissions {
        let client = Permissions::VIEW_OWN_WORKOUTS
            .union(Permissions::LOG_OWN_WORKOUTS)
            .union(Permissions::VIEW_EXERCISES);
        let trainer = client
            .union(Permissions::VIEW_ALL_WORKOUTS)
            .union(Permissions::MANAGE_WORKOUTS)
            .union(Permissions::MANAGE_EXERCISES)
            .union(Permissions::MANAGE_USERS);
        match self {
            Self::Client => client,
            Self::Trainer => trainer,
            Self::GymAdmin => trainer.union(Permissions::MANAGE_GYM),
            Self::Admin => Permissions::all(),
        }
    }

    /// Whether the role grants every flag in `required`
    #[must_use]
    pub const fn has(self, required: Permissions) -> bool {
        self.permissions().contains(required)
    }

    /// Trainers, gym admins, and admins
    #[must_use]
    pub const fn is_staff(self) -> bool {
        self.has(Permissions::MANAGE_WORKOUTS)
    }

    /// Gym admins and admins
    #[must_use]
    pub const fn can_manage_gym(self) -> bool {
        self.has(Permissions::MANAGE_GYM)
    }

    /// Admins are not limited to a single gym
    #[must_use]
    pub const fn is_unrestricted(self) -> bool {
        self.has(Permissions::MANAGE_PLATFORM)
    }

    /// Whether a user with this role may create an account with `target`
    #[must_use]
    pub fn can_assign(self, target: Self) -> bool {
        self.has(Permissions::MANAGE_USERS) && target <= self
    }

    /// Roles listed on the trainers page
    #[must_use]
    pub const fn staff_roles() -> [Self; 3] {
        [Self::Trainer, Self::GymAdmin, Self::Admin]
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Self::Client),
            "TRAINER" => Ok(Self::Trainer),
            "GYM_ADMIN" => Ok(Self::GymAdmin),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// One entry of the navigation menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Label shown to the user
    pub title: String,
    /// Client-side route
    pub href: String,
}

impl MenuItem {
    fn new(title: &str, href: &str) -> Self {
        Self {
            title: title.to_owned(),
            href: href.to_owned(),
        }
    }
}

/// Navigation menu for a role
#[must_use]
pub fn menu_for(role: UserRole) -> Vec<MenuItem> {
    if role.is_staff() {
        let mut items = vec![
            MenuItem::new("Home", "/"),
            MenuItem::new("Workouts", "/workouts"),
            MenuItem::new("Clients", "/clients"),
            MenuItem::new("Trainers", "/trainers"),
            MenuItem::new("Progress", "/progress"),
            MenuItem::new("Exercises", "/exercises"),
        ];
        if role.can_manage_gym() {
            items.push(MenuItem::new("Gym Settings", "/gym/settings"));
        }
        items
    } else {
        vec![
            MenuItem::new("Home", "/"),
            MenuItem::new("My Workouts", "/workouts"),
            MenuItem::new("Progress", "/progress"),
            MenuItem::new("Exercises", "/exercises"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_roles() {
        assert!(!UserRole::Client.is_staff());
        assert!(UserRole::Trainer.is_staff());
        assert!(UserRole::GymAdmin.is_staff());
        assert!(UserRole::Admin.is_staff());
    }

    #[test]
    fn test_gym_management() {
        assert!(!UserRole::Trainer.can_manage_gym());
        assert!(UserRole::GymAdmin.can_manage_gym());
        assert!(UserRole::Admin.can_manage_gym());
        assert!(!UserRole::GymAdmin.is_unrestricted());
        assert!(UserRole::Admin.is_unrestricted());
    }

    #[test]
    fn test_role_assignment_ladder() {
        assert!(UserRole::Trainer.can_assign(UserRole::Client));
        assert!(UserRole::Trainer.can_assign(UserRole::Trainer));
        assert!(!UserRole::Trainer.can_assign(UserRole::GymAdmin));
        assert!(UserRole::GymAdmin.can_assign(UserRole::GymAdmin));
        assert!(!UserRole::GymAdmin.can_assign(UserRole::Admin));
        assert!(UserRole::Admin.can_assign(UserRole::Admin));
        assert!(!UserRole::Client.can_assign(UserRole::Client));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("gym_admin".parse::<UserRole>(), Ok(UserRole::GymAdmin));
        assert_eq!(" TRAINER ".parse::<UserRole>(), Ok(UserRole::Trainer));
        assert!("coach".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_matches_as_str() {
        let json = serde_json::to_string(&UserRole::GymAdmin).unwrap();
        assert_eq!(json, "\"GYM_ADMIN\"");
    }

    #[test]
    fn test_menus() {
        let client: Vec<_> = menu_for(UserRole::Client)
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(client, ["Home", "My Workouts", "Progress", "Exercises"]);

        let trainer = menu_for(UserRole::Trainer);
        assert_eq!(trainer.len(), 6);
        assert!(trainer.iter().all(|m| m.href != "/gym/settings"));

        let gym_admin = menu_for(UserRole::GymAdmin);
        assert_eq!(gym_admin.last().map(|m| m.href.as_str()), Some("/gym/settings"));
    }
}
