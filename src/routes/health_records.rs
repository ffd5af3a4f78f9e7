// ABOUTME: Health record route handlers
// ABOUTME: Provides REST endpoints for listing, registering, and deleting uploaded health documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Health record routes
//!
//! Records reference files stored elsewhere; this server only tracks the
//! metadata rows scoped to their owner.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::HealthRecord;
use crate::routes::authenticated_user;
use crate::server::ServerResources;

/// Response body for the health record listing
#[derive(Debug, Serialize)]
struct HealthRecordsResponse {
    /// Records, newest first
    records: Vec<HealthRecord>,
}

/// Request body for registering an uploaded document
#[derive(Debug, Deserialize)]
struct CreateHealthRecordRequest {
    /// Display name of the uploaded file
    file_name: String,
    /// Location of the stored file
    file_url: String,
    /// MIME type, when known
    #[serde(default)]
    file_type: Option<String>,
}

/// Health record routes handler
pub struct HealthRecordRoutes;

impl HealthRecordRoutes {
    /// Create all health record routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health-records", get(Self::list_records))
            .route("/api/health-records", post(Self::create_record))
            .route("/api/health-records/:record_id", delete(Self::delete_record))
            .with_state(resources)
    }

    /// GET /api/health-records - list the authenticated user's records
    async fn list_records(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let records = resources.database.health_records().list(&user_id).await?;

        Ok((StatusCode::OK, Json(HealthRecordsResponse { records })).into_response())
    }

    /// POST /api/health-records - register an uploaded document
    async fn create_record(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateHealthRecordRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        if request.file_name.is_empty() || request.file_url.is_empty() {
            return Err(AppError::invalid_input("File name and URL are required"));
        }

        let record = resources
            .database
            .health_records()
            .create(
                &user_id,
                &request.file_name,
                &request.file_url,
                request.file_type.as_deref(),
            )
            .await?;

        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    /// DELETE /api/health-records/:record_id - remove one of the user's records
    async fn delete_record(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(record_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let deleted = resources
            .database
            .health_records()
            .delete(&record_id, &user_id)
            .await?;

        if !deleted {
            return Err(AppError::not_found("Health record not found"));
        }

        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
