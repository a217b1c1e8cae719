// ABOUTME: Unified error handling re-exported from gymtrack-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error types live in `gymtrack-core` so the CLI and the server share one
//! error vocabulary and one JSON error body.

pub use gymtrack_core::errors::*;
