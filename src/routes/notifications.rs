// ABOUTME: Notification route handlers
// ABOUTME: Provides REST endpoints for listing notifications and marking them read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Notification routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Notification;
use crate::routes::authenticated_user;
use crate::server::ServerResources;

/// Response body for the notification listing
#[derive(Debug, Serialize)]
struct NotificationsResponse {
    /// Notifications, newest first
    notifications: Vec<Notification>,
}

/// Notification routes handler
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/notifications", get(Self::list_notifications))
            .route(
                "/api/notifications/:notification_id/read",
                post(Self::mark_read),
            )
            .with_state(resources)
    }

    /// GET /api/notifications - list the authenticated user's notifications
    async fn list_notifications(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let notifications = resources.database.notifications().list(&user_id).await?;

        Ok((
            StatusCode::OK,
            Json(NotificationsResponse { notifications }),
        )
            .into_response())
    }

    /// POST /api/notifications/:notification_id/read - mark one notification read
    async fn mark_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(notification_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let updated = resources
            .database
            .notifications()
            .mark_read(&notification_id, &user_id)
            .await?;

        if !updated {
            return Err(AppError::not_found("Notification not found"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
