// ABOUTME: Database operations for the doctor directory
// ABOUTME: Read paths for the app plus an idempotent upsert for seed tooling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::Doctor;

/// Doctor directory database operations
pub struct DoctorsManager {
    pool: SqlitePool,
}

impl DoctorsManager {
    /// Create a new doctors manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all doctors ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn list(&self) -> AppResult<Vec<Doctor>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, specialty, years_experience, rating, profile_picture, created_at
            FROM doctors
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list doctors: {e}")))?;

        Ok(rows.into_iter().map(map_doctor_row).collect())
    }

    /// Get a doctor by ID
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get(&self, doctor_id: &str) -> AppResult<Option<Doctor>> {
        let row = sqlx::query(
            r"
            SELECT id, name, specialty, years_experience, rating, profile_picture, created_at
            FROM doctors
            WHERE id = $1
            ",
        )
        .bind(doctor_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get doctor: {e}")))?;

        Ok(row.map(map_doctor_row))
    }

    /// Insert or update a doctor (seed tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn upsert(&self, doctor: &Doctor) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO doctors (id, name, specialty, years_experience, rating, profile_picture, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                specialty = excluded.specialty,
                years_experience = excluded.years_experience,
                rating = excluded.rating,
                profile_picture = excluded.profile_picture
            ",
        )
        .bind(&doctor.id)
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(doctor.years_experience)
        .bind(doctor.rating)
        .bind(&doctor.profile_picture)
        .bind(&doctor.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert doctor: {e}")))?;

        Ok(())
    }
}

fn map_doctor_row(r: sqlx::sqlite::SqliteRow) -> Doctor {
    Doctor {
        id: r.get("id"),
        name: r.get("name"),
        specialty: r.get("specialty"),
        years_experience: r.get("years_experience"),
        rating: r.get("rating"),
        profile_picture: r.get("profile_picture"),
        created_at: r.get("created_at"),
    }
}
