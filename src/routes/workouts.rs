// ABOUTME: Workout route handlers
// ABOUTME: Sessions, sets, exercise groups, rounds, logged values, and completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body, parse_id, query_params, today};
use crate::database::SetExerciseActuals;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::workouts::{
    self, AddExerciseRequest, CreateWorkoutRequest, GroupKey, TargetsRequest,
    WorkoutDetailsRequest,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Body of the group-wide target edit
#[derive(Debug, Deserialize)]
pub struct GroupTargetsBody {
    /// Group to edit
    #[serde(flatten)]
    pub key: GroupKey,
    /// New targets
    #[serde(flatten)]
    pub targets: TargetsRequest,
}

/// Workout routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update_details)
                    .delete(Self::handle_delete),
            )
            .route("/api/workouts/:id/complete", post(Self::handle_complete))
            .route("/api/workouts/:id/sets", post(Self::handle_add_set))
            .route(
                "/api/clients/:id/recent-workouts",
                get(Self::handle_recent_for_client),
            )
            .route("/api/sets/:id", delete(Self::handle_delete_set))
            .route("/api/sets/:id/exercises", post(Self::handle_add_exercise))
            .route("/api/sets/:id/rounds", post(Self::handle_add_round))
            .route("/api/sets/:id/targets", put(Self::handle_update_group_targets))
            .route("/api/sets/:id/groups", delete(Self::handle_delete_group))
            .route(
                "/api/set-exercises/:id",
                put(Self::handle_update_exercise).delete(Self::handle_delete_exercise),
            )
            .route(
                "/api/set-exercises/:id/targets",
                put(Self::handle_update_exercise_targets),
            )
            .with_state(resources)
    }

    // ================================
    // Sessions
    // ================================

    /// Handle GET /api/workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let list = workouts::list_workouts(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle POST /api/workouts
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<CreateWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let session = workouts::create_workout(&resources.database, &auth, request, today()).await?;
        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let detail = workouts::get_workout(&resources.database, &auth, parse_id(&id, "workout")?).await?;
        Ok((StatusCode::OK, Json(detail)).into_response())
    }

    /// Handle PUT /api/workouts/:id
    async fn handle_update_details(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Result<Json<WorkoutDetailsRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        workouts::update_workout_details(&resources.database, &auth, parse_id(&id, "workout")?, request)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        workouts::delete_workout(&resources.database, &auth, parse_id(&id, "workout")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/workouts/:id/complete
    async fn handle_complete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        workouts::complete_workout(&resources.database, &auth, parse_id(&id, "workout")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/clients/:id/recent-workouts
    async fn handle_recent_for_client(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let recent =
            workouts::recent_workouts_for_client(&resources.database, &auth, parse_id(&id, "client")?)
                .await?;
        Ok((StatusCode::OK, Json(recent)).into_response())
    }

    // ================================
    // Sets
    // ================================

    /// Handle POST /api/workouts/:id/sets
    async fn handle_add_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let set = workouts::add_set(&resources.database, &auth, parse_id(&id, "workout")?).await?;
        Ok((StatusCode::CREATED, Json(set)).into_response())
    }

    /// Handle DELETE /api/sets/:id
    async fn handle_delete_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        workouts::delete_set(&resources.database, &auth, parse_id(&id, "set")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/sets/:id/exercises
    async fn handle_add_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Result<Json<AddExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let rounds =
            workouts::add_exercise_to_set(&resources.database, &auth, parse_id(&id, "set")?, request)
                .await?;
        Ok((StatusCode::CREATED, Json(rounds)).into_response())
    }

    /// Handle POST /api/sets/:id/rounds
    async fn handle_add_round(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        key: Result<Json<GroupKey>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let key = json_body(key)?;
        let round = workouts::add_round(&resources.database, &auth, parse_id(&id, "set")?, key).await?;
        Ok((StatusCode::CREATED, Json(round)).into_response())
    }

    /// Handle PUT /api/sets/:id/targets
    async fn handle_update_group_targets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        body: Result<Json<GroupTargetsBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let body = json_body(body)?;
        let updated = workouts::update_all_rounds_targets(
            &resources.database,
            &auth,
            parse_id(&id, "set")?,
            body.key,
            body.targets,
        )
        .await?;
        Ok((StatusCode::OK, Json(serde_json::json!({ "updated": updated }))).into_response())
    }

    /// Handle DELETE /api/sets/:id/groups?exercise_id=&order=
    async fn handle_delete_group(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        key: Result<Query<GroupKey>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let key = query_params(key)?;
        let deleted =
            workouts::delete_exercise_group(&resources.database, &auth, parse_id(&id, "set")?, key)
                .await?;
        Ok((StatusCode::OK, Json(serde_json::json!({ "deleted": deleted }))).into_response())
    }

    // ================================
    // Rounds
    // ================================

    /// Handle PUT /api/set-exercises/:id
    async fn handle_update_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        actuals: Result<Json<SetExerciseActuals>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let actuals = json_body(actuals)?;
        let row = workouts::update_exercise(
            &resources.database,
            &auth,
            parse_id(&id, "set exercise")?,
            actuals,
        )
        .await?;
        Ok((StatusCode::OK, Json(row)).into_response())
    }

    /// Handle PUT /api/set-exercises/:id/targets
    async fn handle_update_exercise_targets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        request: Result<Json<TargetsRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        workouts::update_exercise_targets(
            &resources.database,
            &auth,
            parse_id(&id, "set exercise")?,
            request,
        )
        .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle DELETE /api/set-exercises/:id
    async fn handle_delete_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        workouts::delete_exercise(&resources.database, &auth, parse_id(&id, "set exercise")?).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
