// ABOUTME: Gym route handlers
// ABOUTME: Branding, gym details with trainers, settings, logo upload, and admin gym creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body, parse_id};
use crate::errors::AppError;
use crate::models::GymId;
use crate::resources::ServerResources;
use crate::services::gyms::{self, CreateGymRequest, UpdateGymRequest};
use axum::extract::rejection::JsonRejection;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Gym routes
pub struct GymRoutes;

impl GymRoutes {
    /// Create all gym routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/gym/branding", get(Self::handle_branding))
            .route("/api/gym/settings", put(Self::handle_update_settings))
            .route("/api/gym/logo", post(Self::handle_upload_logo))
            .route("/api/gyms", post(Self::handle_create_gym))
            .route("/api/gyms/:id", get(Self::handle_get_gym))
            .with_state(resources)
    }

    /// Handle GET /api/gym/branding
    async fn handle_branding(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let branding = gyms::branding(&resources.database, &auth).await?;
        Ok((StatusCode::OK, Json(branding)).into_response())
    }

    /// Handle GET /api/gyms/:id
    async fn handle_get_gym(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let gym_id = GymId::from(parse_id(&id, "gym")?);
        let details = gyms::get_gym(&resources.database, &auth, gym_id).await?;
        Ok((StatusCode::OK, Json(details)).into_response())
    }

    /// Handle PUT /api/gym/settings
    async fn handle_update_settings(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<UpdateGymRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let gym = gyms::update_gym(&resources.database, &auth, request).await?;
        Ok((StatusCode::OK, Json(gym)).into_response())
    }

    /// Handle POST /api/gym/logo
    ///
    /// The body is the raw image; its type comes from `Content-Type`.
    async fn handle_upload_logo(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let mime = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream");
        let logo = gyms::upload_logo(&resources.database, &auth, &body, mime).await?;
        Ok((StatusCode::OK, Json(serde_json::json!({ "logo": logo }))).into_response())
    }

    /// Handle POST /api/gyms
    async fn handle_create_gym(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        request: Result<Json<CreateGymRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = json_body(request)?;
        let gym = gyms::create_gym(&resources.database, &auth, request).await?;
        Ok((StatusCode::CREATED, Json(gym)).into_response())
    }
}
