// ABOUTME: Authentication route handlers
// ABOUTME: Login issuing a JWT and httpOnly cookie, the session view, and logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie};
use crate::services::auth::{self as auth_service, LoginRequest};
use axum::extract::rejection::JsonRejection;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/session", get(Self::handle_session))
            .route("/api/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        request: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(request)?;
        let outcome =
            auth_service::login(&resources.database, &resources.auth_manager, request).await?;

        let mut headers = HeaderMap::new();
        set_auth_cookie(
            &mut headers,
            &outcome.token,
            resources.auth_manager.token_expiry_hours() * 3600,
            resources.config.environment.is_production(),
        );

        Ok((StatusCode::OK, headers, Json(outcome)).into_response())
    }

    /// Handle GET /api/auth/session
    async fn handle_session(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        Ok((StatusCode::OK, Json(auth_service::session(&auth))).into_response())
    }

    /// Handle POST /api/auth/logout
    ///
    /// Always succeeds; tokens are stateless so there is nothing to revoke.
    async fn handle_logout() -> Response {
        let mut headers = HeaderMap::new();
        clear_auth_cookie(&mut headers);
        (
            StatusCode::OK,
            headers,
            Json(serde_json::json!({ "success": true })),
        )
            .into_response()
    }
}
