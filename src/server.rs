// ABOUTME: HTTP server assembly: merges route groups and applies the middleware stack
// ABOUTME: Binds the listener and serves until SIGTERM or SIGINT, then drains gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits::MAX_LOGO_BYTES;
use crate::errors::AppError;
use crate::middleware::{make_request_span, setup_cors, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, ExerciseRoutes, GymRoutes, HealthRoutes, HomeRoutes, ProgressRoutes, UserRoutes,
    WorkoutRoutes,
};
use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Uri};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Headroom over the logo limit for JSON bodies and upload framing
const BODY_LIMIT_BYTES: usize = MAX_LOGO_BYTES + 64 * 1024;

/// Build the full application router
///
/// Exposed separately from [`run`] so integration tests can drive it with
/// `tower::ServiceExt::oneshot`.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(HomeRoutes::routes(resources.clone()))
        .merge(GymRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(ExerciseRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources.clone()))
        .merge(ProgressRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(timeout))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(cors)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run(resources: Arc<ServerResources>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP server listening on http://{addr}");
    let app = build_router(resources);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
                    _ = sigint.recv() => info!("SIGINT received, shutting down"),
                }
            }
            _ => {
                tracing::warn!("Signal handlers unavailable, falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl-C received, shutting down");
    }
}
