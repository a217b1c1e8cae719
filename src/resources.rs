// ABOUTME: Shared resource container handed to every route group
// ABOUTME: Holds the database, the JWT manager, and the loaded configuration behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use std::sync::Arc;

/// Resources shared by all handlers
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence layer
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wrap the long-lived services in `Arc`s
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config: Arc::new(config),
        }
    }

    /// Build resources from configuration, connecting to the configured database
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection or migrations fail
    pub async fn from_config(config: ServerConfig) -> crate::errors::AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        let auth_manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );
        Ok(Self::new(database, auth_manager, config))
    }
}
