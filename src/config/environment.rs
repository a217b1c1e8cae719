// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database URL, JWT settings, CORS origins, and timeouts from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{auth, ports};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};
use uuid::Uuid;

/// Minimum JWT secret length accepted in production
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL, e.g. `sqlite:./data/gymtrack.db` or `sqlite::memory:`
    pub url: String,
}

/// Token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime
    pub jwt_expiry_hours: i64,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma separated origins, or `*`
    pub allowed_origins: String,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite:./data/gymtrack.db".to_owned(),
            },
            auth: AuthConfig {
                jwt_secret: generate_dev_secret(),
                jwt_expiry_hours: auth::DEFAULT_JWT_EXPIRY_HOURS,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if a numeric variable does not parse, or if
    /// production runs without a strong `JWT_SECRET`
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));
        let defaults = Self::default();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set; using an ephemeral secret (sessions end on restart)");
                defaults.auth.jwt_secret
            }
        };

        let config = Self {
            host: env_var_or("HOST", &defaults.host),
            http_port: parse_env("HTTP_PORT", defaults.http_port)?,
            environment,
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", &defaults.database.url),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: parse_env("JWT_EXPIRY_HOURS", auth::DEFAULT_JWT_EXPIRY_HOURS)?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a config error describing the first violated constraint
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRY_HOURS must be positive"));
        }
        if self.environment.is_production() {
            if env::var("JWT_SECRET").is_err() {
                return Err(AppError::config("JWT_SECRET is required in production"));
            }
            if self.auth.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(AppError::config(format!(
                    "JWT_SECRET must be at least {MIN_PRODUCTION_SECRET_LEN} characters in production"
                )));
            }
            if self.cors.allowed_origins == "*" {
                warn!("CORS allows any origin in production");
            }
        }
        Ok(())
    }

    /// Human readable configuration summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "GymTrack Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Database: {}\n\
             - JWT Expiry: {}h\n\
             - CORS Origins: {}\n\
             - Request Timeout: {}s",
            self.environment,
            self.host,
            self.http_port,
            if self.database.url.contains(":memory:") {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.auth.jwt_expiry_hours,
            self.cors.allowed_origins,
            self.request_timeout_secs,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

fn generate_dev_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
