// ABOUTME: Application error type shared across routes, database, and LLM layers
// ABOUTME: Maps each error class to an HTTP status and a JSON error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Error handling for the RehabFlow server.
//!
//! Every fallible path returns [`AppError`], which carries enough context to
//! log and to render a structured `{"error": "..."}` body. Axum handlers
//! return `Result<Response, AppError>` and rely on the [`IntoResponse`]
//! implementation for the error branch.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation (missing or malformed fields)
    #[error("{0}")]
    InvalidInput(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Caller identity is missing or not usable
    #[error("{0}")]
    AuthInvalid(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// An upstream service call failed
    #[error("{service} error: {message}")]
    ExternalService {
        /// Name of the upstream service
        service: String,
        /// Failure detail
        message: String,
    },

    /// Server configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure (HTTP 400)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Missing entity (HTTP 404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Missing or unusable caller identity (HTTP 401)
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::AuthInvalid(message.into())
    }

    /// Database failure (HTTP 500)
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Upstream service failure (HTTP 502)
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Configuration failure (HTTP 500)
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Unexpected internal failure (HTTP 500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status this error maps to
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AuthInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::ExternalService { .. } => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}
