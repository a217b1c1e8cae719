// ABOUTME: Caller authentication from request headers
// ABOUTME: Accepts a Bearer token or the auth_token cookie and records the caller on the current span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::{AuthManager, AuthResult};
use crate::constants::auth::AUTH_COOKIE_NAME;
use crate::errors::{AppError, AppResult};
use crate::security::cookies::get_cookie_value;
use axum::http::HeaderMap;

/// Authenticate a request from its headers
///
/// The `Authorization: Bearer` header wins over the session cookie so API
/// clients are never shadowed by a stale browser cookie.
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when no credential is present, and `AUTH_INVALID`
/// or `AUTH_EXPIRED` when the token does not validate
#[tracing::instrument(
    skip(headers, auth_manager),
    fields(auth_method = tracing::field::Empty, user_id = tracing::field::Empty)
)]
pub fn authenticate_headers(headers: &HeaderMap, auth_manager: &AuthManager) -> AppResult<AuthResult> {
    let span = tracing::Span::current();

    let bearer = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned);

    let token = if let Some(token) = bearer {
        span.record("auth_method", "bearer");
        token
    } else if let Some(token) = get_cookie_value(headers, AUTH_COOKIE_NAME) {
        span.record("auth_method", "cookie");
        token
    } else {
        return Err(AppError::auth_required());
    };

    match auth_manager.authenticate(&token) {
        Ok(auth) => {
            span.record("user_id", auth.user_id.to_string());
            Ok(auth)
        }
        Err(e) => {
            tracing::debug!("Token rejected: {}", e.message);
            Err(e)
        }
    }
}
