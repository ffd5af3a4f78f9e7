// ABOUTME: Shared server resources and HTTP server assembly
// ABOUTME: Merges per-area routers and applies trace and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Server wiring.
//!
//! [`ServerResources`] bundles everything handlers need — database, config,
//! and the LLM provider — behind one `Arc` created at startup. [`RehabServer`]
//! assembles the router and serves it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;
use crate::routes::{
    ChatRoutes, DoctorRoutes, FeedRoutes, HealthRecordRoutes, HealthRoutes, NotificationRoutes,
    ProfileRoutes, ReviewRoutes,
};

/// Shared resources available to every request handler
pub struct ServerResources {
    /// Database connection pool
    pub database: Database,
    /// Server configuration loaded at startup
    pub config: ServerConfig,
    /// Chat-completion provider
    pub llm_provider: Arc<dyn LlmProvider>,
}

impl ServerResources {
    /// Bundle resources for handler state
    #[must_use]
    pub fn new(
        database: Database,
        config: ServerConfig,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            database,
            config,
            llm_provider,
        }
    }
}

/// HTTP server for the RehabFlow REST surface
pub struct RehabServer {
    resources: Arc<ServerResources>,
}

impl RehabServer {
    /// Create a server from shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router
    ///
    /// Also used directly by route tests, which drive it with `oneshot`
    /// requests instead of a bound listener.
    #[must_use]
    pub fn router(resources: &Arc<ServerResources>) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(ChatRoutes::routes(resources.clone()))
            .merge(DoctorRoutes::routes(resources.clone()))
            .merge(ProfileRoutes::routes(resources.clone()))
            .merge(FeedRoutes::routes(resources.clone()))
            .merge(NotificationRoutes::routes(resources.clone()))
            .merge(HealthRecordRoutes::routes(resources.clone()))
            .merge(ReviewRoutes::routes(resources.clone()))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors_layer()),
            )
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails.
    pub async fn run(&self) -> AppResult<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.resources.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        info!("RehabFlow server listening on {addr}");

        axum::serve(listener, Self::router(&self.resources))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

/// Permissive CORS: the API is consumed by browser clients on other origins
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Failed to listen for shutdown signal");
    }
}
