// ABOUTME: Database operations for user notifications
// ABOUTME: Per-user newest-first listing and ownership-scoped read marking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Notification, NotificationType};

/// Notification database operations
pub struct NotificationsManager {
    pool: SqlitePool,
}

impl NotificationsManager {
    /// Create a new notifications manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's notifications newest-first
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, type, title, message, read, metadata, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list notifications: {e}")))?;

        Ok(rows.into_iter().map(map_notification_row).collect())
    }

    /// Create a notification for a user
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(
        &self,
        user_id: &str,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        metadata: Option<&serde_json::Value>,
    ) -> AppResult<Notification> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let metadata_json = metadata.map(serde_json::Value::to_string);

        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, type, title, message, read, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(notification_type.as_str())
        .bind(title)
        .bind(message)
        .bind(&metadata_json)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create notification: {e}")))?;

        Ok(Notification {
            id,
            user_id: user_id.to_owned(),
            notification_type: notification_type.as_str().to_owned(),
            title: title.to_owned(),
            message: message.to_owned(),
            read: false,
            metadata: metadata.cloned(),
            created_at: now,
        })
    }

    /// Mark a notification as read, scoped to its owner
    ///
    /// Returns `false` when the notification does not exist or belongs to
    /// another user.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn mark_read(&self, notification_id: &str, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET read = 1
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to mark notification read: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_notification_row(r: sqlx::sqlite::SqliteRow) -> Notification {
    let metadata: Option<String> = r.get("metadata");
    Notification {
        id: r.get("id"),
        user_id: r.get("user_id"),
        notification_type: r.get("type"),
        title: r.get("title"),
        message: r.get("message"),
        read: r.get("read"),
        metadata: metadata.and_then(|raw| serde_json::from_str(&raw).ok()),
        created_at: r.get("created_at"),
    }
}
