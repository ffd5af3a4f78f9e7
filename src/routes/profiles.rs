// ABOUTME: Patient profile route handlers
// ABOUTME: Provides REST endpoints for reading and updating the authenticated user's profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Patient profile routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use crate::errors::AppError;
use crate::models::ProfileUpdate;
use crate::routes::authenticated_user;
use crate::server::ServerResources;

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::get_profile))
            .route("/api/profile", put(Self::update_profile))
            .with_state(resources)
    }

    /// GET /api/profile - fetch the authenticated user's profile
    async fn get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let profile = resources
            .database
            .profiles()
            .get(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// PUT /api/profile - create or update the authenticated user's profile
    ///
    /// Fields omitted from the request body are cleared, matching a full
    /// profile-form submission rather than a patch.
    async fn update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let profile = resources.database.profiles().upsert(&user_id, &update).await?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
