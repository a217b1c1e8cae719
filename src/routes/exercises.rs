// ABOUTME: Exercise library route handlers
// ABOUTME: Filtered search, filter vocabularies, the workout editor picker, and custom creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body, query_params};
use crate::constants::exercise_vocabulary::{CATEGORIES, EQUIPMENT, PRIMARY_MUSCLES};
use crate::database::ExerciseFilterOptions;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::exercises::{self, CreateExerciseRequest, ExerciseQuery};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Filter choices: values present in the library plus the canonical vocabularies
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    /// Values present in the visible library
    #[serde(flatten)]
    pub present: ExerciseFilterOptions,
    /// Canonical vocabularies for the create form
    pub vocabulary: Vocabulary,
}

/// Canonical exercise vocabularies
#[derive(Debug, Serialize)]
pub struct Vocabulary {
    /// Categories
    pub categories: &'static [&'static str],
    /// Primary muscles
    pub primary_muscles: &'static [&'static str],
    /// Equipment
    pub equipment: &'static [&'static str],
}

/// Exercise routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_list).post(Self::handle_create))
            .route("/api/exercises/filters", get(Self::handle_filters))
            .route("/api/exercises/picker", get(Self::handle_picker))
            .with_state(resources)
    }

    /// Handle GET /api/exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<ExerciseQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let query = query_params(query)?;
        let list = exercises::list_exercises(&resources.database, &auth, query).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle POST /api/exercises
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<CreateExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let exercise = exercises::create_exercise(&resources.database, &auth, request).await?;
        Ok((StatusCode::CREATED, Json(exercise)).into_response())
    }

    /// Handle GET /api/exercises/filters
    async fn handle_filters(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let present = resources
            .database
            .exercise_filter_options(auth.scope())
            .await?;
        let response = FilterOptionsResponse {
            present,
            vocabulary: Vocabulary {
                categories: CATEGORIES,
                primary_muscles: PRIMARY_MUSCLES,
                equipment: EQUIPMENT,
            },
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/exercises/picker
    async fn handle_picker(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let list = resources.database.exercise_picker(auth.scope()).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }
}
