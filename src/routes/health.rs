// ABOUTME: Health check route handler for liveness and readiness probes
// ABOUTME: Reports server status and database connectivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Health check routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::server::ServerResources;

/// Health check routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .with_state(resources)
    }

    /// GET /health - server liveness with database connectivity status
    async fn health_check(State(resources): State<Arc<ServerResources>>) -> Response {
        match resources.database.health_check().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({"status": "ok", "database": "connected"})),
            )
                .into_response(),
            Err(e) => {
                warn!("Database health check failed: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"status": "degraded", "database": "unavailable"})),
                )
                    .into_response()
            }
        }
    }
}
