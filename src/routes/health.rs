// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness is static, readiness pings the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Health check routes for service monitoring
//!
//! Neither endpoint requires a user identity.

use crate::resources::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "service": crate::constants::service_names::MYFOOD_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let (status, label) = match resources.database.ping().await {
                Ok(()) => (StatusCode::OK, "ready"),
                Err(e) => {
                    tracing::warn!(error = %e, "Readiness check failed");
                    (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
                }
            };
            (
                status,
                Json(serde_json::json!({
                    "status": label,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
