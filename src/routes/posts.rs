// ABOUTME: Community feed route handlers
// ABOUTME: Provides REST endpoints for listing, creating, and liking feed posts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Community feed routes
//!
//! Reading the feed is public. Posting requires the gateway header; author
//! details are filled from the poster's profile rather than trusted from the
//! request body.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{NewPost, Post, PostCategory};
use crate::routes::authenticated_user;
use crate::server::ServerResources;

/// Query parameters for the feed listing
#[derive(Debug, Deserialize)]
struct FeedQuery {
    /// Restrict the feed to one category
    #[serde(default)]
    category: Option<String>,
}

/// Response body for the feed listing
#[derive(Debug, Serialize)]
struct FeedResponse {
    /// Posts, newest first
    posts: Vec<Post>,
}

/// Request body for creating a post
#[derive(Debug, Deserialize)]
struct CreatePostRequest {
    /// Post text
    content: String,
    /// Category, defaults to `general`
    #[serde(default)]
    category: Option<String>,
    /// Optional attached image
    #[serde(default)]
    image_url: Option<String>,
    /// Free-form topic tags
    #[serde(default)]
    tags: Vec<String>,
}

/// Response body after liking a post
#[derive(Debug, Serialize)]
struct LikeResponse {
    /// Like count after the increment
    likes: i64,
}

/// Community feed routes handler
pub struct FeedRoutes;

impl FeedRoutes {
    /// Create all feed routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/feed", get(Self::list_feed))
            .route("/api/feed", post(Self::create_post))
            .route("/api/feed/:post_id/like", post(Self::like_post))
            .with_state(resources)
    }

    /// GET /api/feed - list posts, newest first, optionally filtered by category
    async fn list_feed(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<FeedQuery>,
    ) -> Result<Response, AppError> {
        let category = query
            .category
            .as_deref()
            .map(|raw| raw.parse::<PostCategory>())
            .transpose()?;

        let posts = resources
            .database
            .posts()
            .list(category.map(PostCategory::as_str))
            .await?;

        Ok((StatusCode::OK, Json(FeedResponse { posts })).into_response())
    }

    /// POST /api/feed - publish a post as the authenticated user
    async fn create_post(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreatePostRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        if request.content.is_empty() {
            return Err(AppError::invalid_input("Post content is required"));
        }

        let category = match request.category.as_deref() {
            Some(raw) => raw.parse::<PostCategory>()?,
            None => PostCategory::General,
        };

        let profile = resources.database.profiles().get(&user_id).await?;
        let author_name = profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| "Community member".to_owned());
        let author_avatar = profile.and_then(|p| p.avatar_url);

        let new_post = NewPost {
            author_id: Some(user_id),
            author_name,
            author_avatar,
            author_title: None,
            author_verified: false,
            category: category.as_str().to_owned(),
            content: request.content,
            image_url: request.image_url,
            tags: request.tags,
        };

        let post = resources.database.posts().create(&new_post).await?;

        Ok((StatusCode::CREATED, Json(post)).into_response())
    }

    /// POST /api/feed/:post_id/like - atomically increment a post's like count
    async fn like_post(
        State(resources): State<Arc<ServerResources>>,
        Path(post_id): Path<String>,
    ) -> Result<Response, AppError> {
        let likes = resources.database.posts().like(&post_id).await?;
        Ok((StatusCode::OK, Json(LikeResponse { likes })).into_response())
    }
}
