// ABOUTME: Doctor review route handlers
// ABOUTME: Provides REST endpoints for submitting and listing doctor reviews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Doctor review routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::DoctorReview;
use crate::routes::authenticated_user;
use crate::server::ServerResources;

/// Response body for the review listing
#[derive(Debug, Serialize)]
struct ReviewsResponse {
    /// The user's reviews, newest first
    reviews: Vec<DoctorReview>,
}

/// Request body for submitting a review
#[derive(Debug, Deserialize)]
struct CreateReviewRequest {
    /// Doctor being reviewed
    doctor_id: String,
    /// Star rating from 1 to 5
    rating: i64,
    /// Optional free-form comments
    #[serde(default)]
    review_text: Option<String>,
}

/// Doctor review routes handler
pub struct ReviewRoutes;

impl ReviewRoutes {
    /// Create all review routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/reviews", get(Self::list_reviews))
            .route("/api/reviews", post(Self::create_review))
            .with_state(resources)
    }

    /// GET /api/reviews - list the authenticated user's reviews
    async fn list_reviews(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let reviews = resources.database.reviews().list_for_user(&user_id).await?;

        Ok((StatusCode::OK, Json(ReviewsResponse { reviews })).into_response())
    }

    /// POST /api/reviews - submit a review for a doctor
    async fn create_review(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateReviewRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        if !(1..=5).contains(&request.rating) {
            return Err(AppError::invalid_input("Rating must be between 1 and 5"));
        }

        // FK enforcement would surface this as an opaque database error
        if resources
            .database
            .doctors()
            .get(&request.doctor_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Doctor not found"));
        }

        let review = resources
            .database
            .reviews()
            .create(
                &user_id,
                &request.doctor_id,
                request.rating,
                request.review_text.as_deref(),
            )
            .await?;

        Ok((StatusCode::CREATED, Json(review)).into_response())
    }
}
