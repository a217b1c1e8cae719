// ABOUTME: User management route handlers
// ABOUTME: Account creation and edits, former/reactivate, and client and trainer rosters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body, parse_id, query_params};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::users::{self, CreateUserRequest, UpdateUserRequest};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Roster query parameters
#[derive(Debug, Default, Deserialize)]
pub struct RosterQuery {
    /// Include former members
    #[serde(default)]
    pub show_former: bool,
}

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", get(Self::handle_list).post(Self::handle_create))
            .route("/api/users/:id", put(Self::handle_update))
            .route("/api/users/:id/former", post(Self::handle_mark_former))
            .route("/api/users/:id/reactivate", post(Self::handle_reactivate))
            .route("/api/clients", get(Self::handle_clients))
            .route("/api/trainers", get(Self::handle_trainers))
            .with_state(resources)
    }

    /// Handle GET /api/users
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let list = users::list_users(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle POST /api/users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<CreateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let user = users::create_user(&resources.database, &auth, request).await?;
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle PUT /api/users/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Result<Json<UpdateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let user_id = parse_id(&id, "user")?;
        let user = users::update_user(&resources.database, &auth, user_id, request).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle POST /api/users/:id/former
    async fn handle_mark_former(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        users::mark_former(&resources.database, &auth, parse_id(&id, "user")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/users/:id/reactivate
    async fn handle_reactivate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        users::reactivate(&resources.database, &auth, parse_id(&id, "user")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/clients
    async fn handle_clients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<RosterQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let query = query_params(query)?;
        let list = users::list_clients(&resources.database, &auth, query.show_former).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/trainers
    async fn handle_trainers(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<RosterQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let query = query_params(query)?;
        let list = users::list_trainers(&resources.database, &auth, query.show_former).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }
}
