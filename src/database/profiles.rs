// ABOUTME: Database operations for user profiles
// ABOUTME: Whole-row upsert keyed by user ID, last write wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::{Profile, ProfileUpdate};

/// Profile database operations
pub struct ProfilesManager {
    pool: SqlitePool,
}

impl ProfilesManager {
    /// Create a new profiles manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get(&self, user_id: &str) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT id, name, age, location, injury_type, recovery_goals,
                   preferred_doctor, avatar_url, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        Ok(row.map(map_profile_row))
    }

    /// Insert or replace a user's profile fields
    ///
    /// Concurrent edits from multiple devices are last-write-wins by design;
    /// `created_at` is preserved across updates.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn upsert(&self, user_id: &str, update: &ProfileUpdate) -> AppResult<Profile> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO profiles (id, name, age, location, injury_type, recovery_goals,
                                  preferred_doctor, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                location = excluded.location,
                injury_type = excluded.injury_type,
                recovery_goals = excluded.recovery_goals,
                preferred_doctor = excluded.preferred_doctor,
                avatar_url = excluded.avatar_url,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(&update.name)
        .bind(update.age)
        .bind(&update.location)
        .bind(&update.injury_type)
        .bind(&update.recovery_goals)
        .bind(&update.preferred_doctor)
        .bind(&update.avatar_url)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert profile: {e}")))?;

        self.get(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Profile missing after upsert"))
    }
}

fn map_profile_row(r: sqlx::sqlite::SqliteRow) -> Profile {
    Profile {
        id: r.get("id"),
        name: r.get("name"),
        age: r.get("age"),
        location: r.get("location"),
        injury_type: r.get("injury_type"),
        recovery_goals: r.get("recovery_goals"),
        preferred_doctor: r.get("preferred_doctor"),
        avatar_url: r.get("avatar_url"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}
