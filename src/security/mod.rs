// ABOUTME: Security helpers for the HTTP layer
// ABOUTME: Exposes httpOnly session cookie handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session cookie building and parsing
pub mod cookies;
