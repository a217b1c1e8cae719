// ABOUTME: Main library entry point for the GymTrack personal training server
// ABOUTME: Wires configuration, persistence, authentication, services, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GymTrack Server
//!
//! A multi-tenant personal training tracker. Gyms own users, workouts, and
//! custom exercises; trainers build workouts out of sets and rounds with
//! target values, clients log actual values, and everyone can chart progress.
//!
//! ## Architecture
//!
//! - **config**: Environment-driven server configuration
//! - **database**: `SQLite` persistence with per-domain query modules
//! - **auth**: JWT issuing and validation, bcrypt password hashing
//! - **services**: Business rules shared by routes and the admin CLI
//! - **routes**: Axum route groups for the JSON API
//! - **server**: Router assembly, middleware, and graceful shutdown

/// Authentication, JWT claims, and password hashing
pub mod auth;

/// Environment configuration
pub mod config;

/// Re-exported constants from the core crate
pub mod constants {
    pub use gymtrack_core::constants::*;
}

/// `SQLite` persistence layer
pub mod database;

/// Unified error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing, authentication)
pub mod middleware;

/// Domain models re-exported from the core crate
pub mod models {
    pub use gymtrack_core::models::*;
}

/// Role-based permissions re-exported from the core crate
pub mod permissions {
    pub use gymtrack_core::permissions::*;
}

/// Shared server state handed to every route group
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Cookie helpers
pub mod security;

/// Server assembly and lifecycle
pub mod server;

/// Business rules extracted from route handlers
pub mod services;
