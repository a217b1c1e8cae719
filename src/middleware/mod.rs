// ABOUTME: HTTP middleware for request tracing, authentication, and CORS
// ABOUTME: Provides request ID spans, caller extraction from headers or cookies, and origin policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer and cookie authentication
pub mod auth;
/// Cross-origin policy
pub mod cors;
/// Request spans keyed by request id
pub mod tracing;

// Caller authentication
pub use auth::authenticate_headers;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{make_request_span, REQUEST_ID_HEADER};
