// ABOUTME: JWT-based user authentication and authorization system
// ABOUTME: Handles token generation, validation, password hashing, and the authenticated caller context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication and Session Management
//!
//! Tokens are HS256 JWTs carrying the caller's role and gym so that most
//! requests can be authorized without a user lookup. Passwords are stored as
//! bcrypt hashes; hashing and verification run on the blocking pool.

use crate::constants::auth::{BCRYPT_COST, JWT_AUDIENCE};
use crate::errors::{AppError, AppResult};
use crate::models::{Gym, GymId, GymScope, User};
use crate::permissions::UserRole;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let ago = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} minutes ago at {}",
                    ago.num_minutes(),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role string (`CLIENT`, `TRAINER`, `GYM_ADMIN`, `ADMIN`)
    pub role: String,
    /// Gym id, absent for gymless admins
    pub gym_id: Option<String>,
    /// Gym slug
    pub gym_slug: Option<String>,
    /// Gym display name
    pub gym_name: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authenticated caller derived from validated claims
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Email at token issue time
    pub email: String,
    /// Display name at token issue time
    pub name: String,
    /// Role of the caller
    pub role: UserRole,
    /// Gym of the caller
    pub gym_id: Option<GymId>,
    /// Gym slug
    pub gym_slug: Option<String>,
    /// Gym name
    pub gym_name: Option<String>,
}

impl AuthResult {
    /// Rows this caller may see
    #[must_use]
    pub const fn scope(&self) -> GymScope {
        GymScope::for_user(self.role, self.gym_id)
    }

    /// Whether the caller is a trainer, gym admin, or admin
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    /// Reject non-staff callers
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` for clients
    pub fn require_staff(&self) -> AppResult<()> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::forbidden("Staff access required"))
        }
    }

    /// Reject callers who cannot manage gym settings
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` unless the caller is a gym admin or admin
    pub fn require_gym_manager(&self) -> AppResult<()> {
        if self.role.can_manage_gym() {
            Ok(())
        } else {
            Err(AppError::forbidden("Gym admin access required"))
        }
    }

    /// Reject everyone but platform admins
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` unless the caller is an admin
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_unrestricted() {
            Ok(())
        } else {
            Err(AppError::forbidden("Admin access required"))
        }
    }
}

impl TryFrom<Claims> for AuthResult {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid subject claim: {e}")))?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(AppError::auth_invalid)?;
        let gym_id = claims
            .gym_id
            .as_deref()
            .map(str::parse::<GymId>)
            .transpose()
            .map_err(|e| AppError::auth_invalid(format!("Invalid gym claim: {e}")))?;

        Ok(Self {
            user_id,
            email: claims.email,
            name: claims.name,
            role,
            gym_id,
            gym_slug: claims.gym_slug,
            gym_name: claims.gym_name,
        })
    }
}

/// Authentication manager for `JWT` tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// When a token issued now would expire
    #[must_use]
    pub fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if encoding fails
    pub fn generate_token(&self, user: &User, gym: Option<&Gym>) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_owned(),
            gym_id: gym.map(|g| g.id.to_string()),
            gym_slug: gym.map(|g| g.slug.clone()),
            gym_name: gym.map(|g| g.name.clone()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.token_expiry_hours)).timestamp(),
            aud: JWT_AUDIENCE.to_owned(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError`] when the token is malformed, carries a
    /// bad signature or audience, or has expired
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[JWT_AUDIENCE]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        let current_time = Utc::now();
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::debug!(user_id = %claims.sub, "JWT token expired");
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        Ok(claims)
    }

    /// Validate a token and build the caller context
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` or `AUTH_INVALID`
    pub fn authenticate(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self.validate_token_detailed(token)?;
        AuthResult::try_from(claims)
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidAudience => JwtValidationError::TokenInvalid {
                reason: "Token audience mismatch".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an internal error if hashing fails
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))
}

/// Verify a password against a bcrypt hash on the blocking pool
///
/// # Errors
///
/// Returns an internal error if the verification task fails
pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn test_user(role: UserRole) -> User {
        User::new(
            "coach@example.com".to_owned(),
            "Coach".to_owned(),
            "hash".to_owned(),
            role,
            None,
        )
    }

    #[test]
    fn test_token_round_trip_with_gym() {
        let manager = AuthManager::new(b"unit-test-secret", 1);
        let gym = Gym::new("Iron Temple".to_owned(), "iron-temple".to_owned());
        let mut user = test_user(UserRole::Trainer);
        user.gym_id = Some(gym.id);

        let token = manager.generate_token(&user, Some(&gym)).unwrap();
        let auth = manager.authenticate(&token).unwrap();

        assert_eq!(auth.user_id, user.id);
        assert_eq!(auth.role, UserRole::Trainer);
        assert_eq!(auth.gym_id, Some(gym.id));
        assert_eq!(auth.gym_slug.as_deref(), Some("iron-temple"));
        assert!(auth.is_staff());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issuer = AuthManager::new(b"secret-one", 1);
        let verifier = AuthManager::new(b"secret-two", 1);
        let token = issuer
            .generate_token(&test_user(UserRole::Client), None)
            .unwrap();

        let err = verifier.authenticate(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let manager = AuthManager::new(b"unit-test-secret", -1);
        let token = manager
            .generate_token(&test_user(UserRole::Client), None)
            .unwrap();

        let err = manager.authenticate(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let manager = AuthManager::new(b"unit-test-secret", 1);
        let err = manager.authenticate("not.a.jwt").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_role_guards() {
        let manager = AuthManager::new(b"unit-test-secret", 1);
        let token = manager
            .generate_token(&test_user(UserRole::Client), None)
            .unwrap();
        let client = manager.authenticate(&token).unwrap();
        assert!(client.require_staff().is_err());
        assert!(client.require_gym_manager().is_err());
        assert!(client.require_admin().is_err());
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("correct horse").await.unwrap();
        assert!(verify_password("correct horse", &hash).await.unwrap());
        assert!(!verify_password("wrong", &hash).await.unwrap());
    }
}
