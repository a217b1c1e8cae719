// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Builds the per-request span carrying method, path, and the propagated request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::Request;
use tracing::Span;

/// Header carrying the correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the span for an HTTP request
///
/// The request id is set by `SetRequestIdLayer` before this runs, so it is
/// always present unless the layer is missing.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}
