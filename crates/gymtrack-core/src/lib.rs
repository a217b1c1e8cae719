// ABOUTME: Core types and constants for the GymTrack personal training platform
// ABOUTME: Foundation crate with error handling, permissions, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GymTrack Core
//!
//! Foundation crate providing shared types and constants for the GymTrack
//! training tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Exercise vocabularies, limits, and defaults
//! - **permissions**: `UserRole` and the permission flags derived from it
//! - **models**: Gyms, users, exercises, workouts, and progress aggregation

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Role-based permission system with bitflags
pub mod permissions;

/// Core data models (Gym, User, Exercise, WorkoutSession, progress points)
pub mod models;
