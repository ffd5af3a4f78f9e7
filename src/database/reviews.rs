// ABOUTME: Database operations for patient reviews of doctors
// ABOUTME: Append-only creation plus per-user newest-first listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::DoctorReview;

/// Doctor review database operations
pub struct ReviewsManager {
    pool: SqlitePool,
}

impl ReviewsManager {
    /// Create a new reviews manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List reviews written by a user, newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<DoctorReview>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, doctor_id, rating, review_text, created_at
            FROM doctor_reviews
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list reviews: {e}")))?;

        Ok(rows.into_iter().map(map_review_row).collect())
    }

    /// Create a review
    ///
    /// The rating range is validated at the API boundary before this insert
    /// runs; the table carries a matching CHECK constraint.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(
        &self,
        user_id: &str,
        doctor_id: &str,
        rating: i64,
        review_text: Option<&str>,
    ) -> AppResult<DoctorReview> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO doctor_reviews (id, user_id, doctor_id, rating, review_text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(doctor_id)
        .bind(rating)
        .bind(review_text)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create review: {e}")))?;

        Ok(DoctorReview {
            id,
            user_id: user_id.to_owned(),
            doctor_id: doctor_id.to_owned(),
            rating,
            review_text: review_text.map(ToOwned::to_owned),
            created_at: now,
        })
    }
}

fn map_review_row(r: sqlx::sqlite::SqliteRow) -> DoctorReview {
    DoctorReview {
        id: r.get("id"),
        user_id: r.get("user_id"),
        doctor_id: r.get("doctor_id"),
        rating: r.get("rating"),
        review_text: r.get("review_text"),
        created_at: r.get("created_at"),
    }
}
