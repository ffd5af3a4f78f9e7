// ABOUTME: Database operations for the community feed
// ABOUTME: Newest-first listing, creation, and atomic like increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{NewPost, Post};

/// Community feed database operations
pub struct PostsManager {
    pool: SqlitePool,
}

impl PostsManager {
    /// Create a new posts manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List posts newest-first, optionally filtered by category
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn list(&self, category: Option<&str>) -> AppResult<Vec<Post>> {
        let rows = match category {
            Some(category) => {
                sqlx::query(
                    r"
                    SELECT id, author_id, author_name, author_avatar, author_title, author_verified,
                           category, content, image_url, likes, comments, tags, created_at
                    FROM posts
                    WHERE category = $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, author_id, author_name, author_avatar, author_title, author_verified,
                           category, content, image_url, likes, comments, tags, created_at
                    FROM posts
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list posts: {e}")))?;

        Ok(rows.into_iter().map(map_post_row).collect())
    }

    /// Create a new post
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn create(&self, new_post: &NewPost) -> AppResult<Post> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let tags_json = serde_json::to_string(&new_post.tags)
            .map_err(|e| AppError::internal(format!("Failed to serialize tags: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, author_name, author_avatar, author_title,
                               author_verified, category, content, image_url, likes, comments,
                               tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, 0, $10, $11)
            ",
        )
        .bind(&id)
        .bind(&new_post.author_id)
        .bind(&new_post.author_name)
        .bind(&new_post.author_avatar)
        .bind(&new_post.author_title)
        .bind(new_post.author_verified)
        .bind(&new_post.category)
        .bind(&new_post.content)
        .bind(&new_post.image_url)
        .bind(&tags_json)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create post: {e}")))?;

        Ok(Post {
            id,
            author_id: new_post.author_id.clone(),
            author_name: new_post.author_name.clone(),
            author_avatar: new_post.author_avatar.clone(),
            author_title: new_post.author_title.clone(),
            author_verified: new_post.author_verified,
            category: new_post.category.clone(),
            content: new_post.content.clone(),
            image_url: new_post.image_url.clone(),
            likes: 0,
            comments: 0,
            tags: new_post.tags.clone(),
            created_at: now,
        })
    }

    /// Increment a post's like counter
    ///
    /// The increment happens in the database rather than read-then-write, so
    /// concurrent likes cannot lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist, or a
    /// database error otherwise.
    pub async fn like(&self, post_id: &str) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET likes = likes + 1
            WHERE id = $1
            ",
        )
        .bind(post_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to like post: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post not found"));
        }

        let row = sqlx::query("SELECT likes FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read like count: {e}")))?;

        Ok(row.get("likes"))
    }

    /// Insert or update a post with a fixed ID (seed tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn upsert(&self, post: &Post) -> AppResult<()> {
        let tags_json = serde_json::to_string(&post.tags)
            .map_err(|e| AppError::internal(format!("Failed to serialize tags: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, author_name, author_avatar, author_title,
                               author_verified, category, content, image_url, likes, comments,
                               tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                author_name = excluded.author_name,
                author_avatar = excluded.author_avatar,
                author_title = excluded.author_title,
                author_verified = excluded.author_verified,
                category = excluded.category,
                content = excluded.content,
                image_url = excluded.image_url,
                tags = excluded.tags
            ",
        )
        .bind(&post.id)
        .bind(&post.author_id)
        .bind(&post.author_name)
        .bind(&post.author_avatar)
        .bind(&post.author_title)
        .bind(post.author_verified)
        .bind(&post.category)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.likes)
        .bind(post.comments)
        .bind(&tags_json)
        .bind(&post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert post: {e}")))?;

        Ok(())
    }
}

fn map_post_row(r: sqlx::sqlite::SqliteRow) -> Post {
    let tags: String = r.get("tags");
    Post {
        id: r.get("id"),
        author_id: r.get("author_id"),
        author_name: r.get("author_name"),
        author_avatar: r.get("author_avatar"),
        author_title: r.get("author_title"),
        author_verified: r.get("author_verified"),
        category: r.get("category"),
        content: r.get("content"),
        image_url: r.get("image_url"),
        likes: r.get("likes"),
        comments: r.get("comments"),
        tags: serde_json::from_str(&tags).unwrap_or_default(),
        created_at: r.get("created_at"),
    }
}
