// ABOUTME: Route module organization for RehabFlow HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain with clean separation of concerns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Route module for the RehabFlow server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions that delegate
//! to the database managers and the LLM provider.

use axum::http::HeaderMap;

use crate::errors::AppError;

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODULES
// ═══════════════════════════════════════════════════════════════

/// Health check and system status routes
pub mod health;

/// Chat proxy and conversation routes
pub mod chat;

/// Doctor directory routes
pub mod doctors;

/// Patient profile routes
pub mod profiles;

/// Community feed routes
pub mod posts;

/// Notification routes
pub mod notifications;

/// Health record routes
pub mod health_records;

/// Doctor review routes
pub mod reviews;

// ═══════════════════════════════════════════════════════════════
// RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

pub use chat::ChatRoutes;
pub use doctors::DoctorRoutes;
pub use health::HealthRoutes;
pub use health_records::HealthRecordRoutes;
pub use notifications::NotificationRoutes;
pub use posts::FeedRoutes;
pub use profiles::ProfileRoutes;
pub use reviews::ReviewRoutes;

/// Resolve the authenticated user from the gateway-populated header
///
/// The auth gateway in front of this server verifies the session and
/// forwards the user id in `x-user-id`. Requests without it are rejected.
pub(crate) fn authenticated_user(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::auth_invalid("Missing x-user-id header"))
}
