// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the GymTrack server
//!
//! All settings come from environment variables; see [`environment`] for the
//! full list and defaults.

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthConfig, CorsConfig, DatabaseConfig, Environment, ServerConfig};
