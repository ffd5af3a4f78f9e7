// ABOUTME: Database operations for uploaded health record references
// ABOUTME: The files live in external object storage; rows hold opaque URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::HealthRecord;

/// Health record database operations
pub struct HealthRecordsManager {
    pool: SqlitePool,
}

impl HealthRecordsManager {
    /// Create a new health records manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's health records newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<HealthRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, file_name, file_url, file_type, created_at
            FROM health_records
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health records: {e}")))?;

        Ok(rows.into_iter().map(map_record_row).collect())
    }

    /// Store a new health record reference
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(
        &self,
        user_id: &str,
        file_name: &str,
        file_url: &str,
        file_type: Option<&str>,
    ) -> AppResult<HealthRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO health_records (id, user_id, file_name, file_url, file_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(file_name)
        .bind(file_url)
        .bind(file_type)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create health record: {e}")))?;

        Ok(HealthRecord {
            id,
            user_id: user_id.to_owned(),
            file_name: file_name.to_owned(),
            file_url: file_url.to_owned(),
            file_type: file_type.map(ToOwned::to_owned),
            created_at: now,
        })
    }

    /// Delete a health record, scoped to its owner
    ///
    /// Returns `false` when the record does not exist or belongs to another
    /// user. Removing the stored file from object storage is the caller's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn delete(&self, record_id: &str, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM health_records
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(record_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete health record: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_record_row(r: sqlx::sqlite::SqliteRow) -> HealthRecord {
    HealthRecord {
        id: r.get("id"),
        user_id: r.get("user_id"),
        file_name: r.get("file_name"),
        file_url: r.get("file_url"),
        file_type: r.get("file_type"),
        created_at: r.get("created_at"),
    }
}
