// ABOUTME: HTTP middleware for the MyFood API
// ABOUTME: CORS configuration and caller identity extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

/// CORS layer built from configuration
pub mod cors;
/// `X-User-Id` caller identity
pub mod user_context;

pub use cors::setup_cors;
pub use user_context::require_user;
