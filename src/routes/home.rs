// ABOUTME: Home page route handler
// ABOUTME: Returns the client or staff home view for the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, today};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::home;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Home routes
pub struct HomeRoutes;

impl HomeRoutes {
    /// Create the home route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/home", get(Self::handle_home))
            .with_state(resources)
    }

    async fn handle_home(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let view = home::home(&resources.database, &auth, today()).await?;
        Ok((StatusCode::OK, Json(view)).into_response())
    }
}
