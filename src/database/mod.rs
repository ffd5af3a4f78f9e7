// ABOUTME: SQLite connection pool wrapper and per-table manager accessors
// ABOUTME: Owns migrations and the health probe; managers own the queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Database access layer.
//!
//! [`Database`] wraps the SQLite pool and hands out one lightweight manager
//! per table family. Managers hold a cloned pool handle and are constructed
//! on demand; all queries live in the manager modules.

pub mod conversations;
pub mod doctors;
pub mod health_records;
pub mod notifications;
pub mod posts;
pub mod profiles;
pub mod reviews;

pub use conversations::ConversationManager;
pub use doctors::DoctorsManager;
pub use health_records::HealthRecordsManager;
pub use notifications::NotificationsManager;
pub use posts::PostsManager;
pub use profiles::ProfilesManager;
pub use reviews::ReviewsManager;

use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL is invalid or malformed
    /// - Database connection fails
    /// - `SQLite` file creation fails
    /// - Migration process fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && database_url != "sqlite::memory:"
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };

        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any migration fails
    /// - Database connection is lost during migration
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");

        // Migrations are embedded at compile time from ./migrations, so they
        // are available regardless of working directory
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Probe connectivity with a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not respond.
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(())
    }

    // ========================================================================
    // Manager Accessors
    // ========================================================================

    /// Conversation and chat message operations
    #[must_use]
    pub fn conversations(&self) -> ConversationManager {
        ConversationManager::new(self.pool.clone())
    }

    /// Doctor directory operations
    #[must_use]
    pub fn doctors(&self) -> DoctorsManager {
        DoctorsManager::new(self.pool.clone())
    }

    /// Profile operations
    #[must_use]
    pub fn profiles(&self) -> ProfilesManager {
        ProfilesManager::new(self.pool.clone())
    }

    /// Community feed operations
    #[must_use]
    pub fn posts(&self) -> PostsManager {
        PostsManager::new(self.pool.clone())
    }

    /// Notification operations
    #[must_use]
    pub fn notifications(&self) -> NotificationsManager {
        NotificationsManager::new(self.pool.clone())
    }

    /// Health record operations
    #[must_use]
    pub fn health_records(&self) -> HealthRecordsManager {
        HealthRecordsManager::new(self.pool.clone())
    }

    /// Doctor review operations
    #[must_use]
    pub fn reviews(&self) -> ReviewsManager {
        ReviewsManager::new(self.pool.clone())
    }
}
