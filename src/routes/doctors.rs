// ABOUTME: Doctor directory route handlers
// ABOUTME: Provides REST endpoints for listing doctors and fetching individual profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Doctor directory routes
//!
//! The directory is readable without authentication so the client can render
//! doctor pickers before a session exists.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Doctor;
use crate::server::ServerResources;

/// Response body for the doctor directory listing
#[derive(Debug, Serialize)]
struct DoctorsResponse {
    /// All doctors ordered by name
    doctors: Vec<Doctor>,
}

/// Doctor directory routes handler
pub struct DoctorRoutes;

impl DoctorRoutes {
    /// Create all doctor routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/doctors", get(Self::list_doctors))
            .route("/api/doctors/:doctor_id", get(Self::get_doctor))
            .with_state(resources)
    }

    /// GET /api/doctors - list the directory ordered by name
    async fn list_doctors(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let doctors = resources.database.doctors().list().await?;
        Ok((StatusCode::OK, Json(DoctorsResponse { doctors })).into_response())
    }

    /// GET /api/doctors/:doctor_id - fetch a single doctor
    async fn get_doctor(
        State(resources): State<Arc<ServerResources>>,
        Path(doctor_id): Path<String>,
    ) -> Result<Response, AppError> {
        let doctor = resources
            .database
            .doctors()
            .get(&doctor_id)
            .await?
            .ok_or_else(|| AppError::not_found("Doctor not found"))?;

        Ok((StatusCode::OK, Json(doctor)).into_response())
    }
}
