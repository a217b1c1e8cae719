// ABOUTME: Progress chart route handlers
// ABOUTME: Chart points for one exercise, exercises with history, and the client filter list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, query_params, today};
use crate::errors::AppError;
use crate::models::UserSummary;
use crate::resources::ServerResources;
use crate::services::progress::{self, ProgressQuery};
use axum::extract::rejection::QueryRejection;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Progress routes
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all progress routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/progress", get(Self::handle_progress))
            .route("/api/progress/exercises", get(Self::handle_exercises))
            .route("/api/progress/clients", get(Self::handle_clients))
            .with_state(resources)
    }

    /// Handle GET /api/progress
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ProgressQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let query = query_params(query)?;
        let points = progress::progress_data(&resources.database, &auth, query, today()).await?;
        Ok((StatusCode::OK, Json(points)).into_response())
    }

    /// Handle GET /api/progress/exercises
    async fn handle_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let list = progress::exercises_with_history(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle GET /api/progress/clients
    async fn handle_clients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let clients: Vec<UserSummary> = progress::clients(&resources.database, &auth)
            .await?
            .iter()
            .map(crate::models::User::summary)
            .collect();
        Ok((StatusCode::OK, Json(clients)).into_response())
    }
}
