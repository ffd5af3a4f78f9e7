// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, server resource, and mock provider helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `rehabflow_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use rehabflow_server::config::environment::{InferenceConfig, ServerConfig};
use rehabflow_server::database::Database;
use rehabflow_server::errors::{AppError, AppResult};
use rehabflow_server::llm::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, LlmProvider, ResponseMessage,
};
use rehabflow_server::models::Doctor;
use rehabflow_server::server::ServerResources;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests
///
/// Defaults to WARN to keep test output quiet; set `TEST_LOG=DEBUG` (or
/// TRACE/INFO) to see more while debugging a failure.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Database Setup
// ============================================================================

/// Create a fresh in-memory database with migrations applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Insert a doctor the routes can resolve
pub async fn seed_test_doctor(
    database: &Database,
    id: &str,
    name: &str,
    specialty: &str,
) -> Result<Doctor> {
    let doctor = Doctor {
        id: id.to_owned(),
        name: name.to_owned(),
        specialty: specialty.to_owned(),
        years_experience: 12,
        rating: 4.8,
        profile_picture: None,
        created_at: Utc::now().to_rfc3339(),
    };
    database.doctors().upsert(&doctor).await?;
    Ok(doctor)
}

// ============================================================================
// Server Resources
// ============================================================================

/// Server configuration pointing at nothing external
pub fn test_server_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        inference: InferenceConfig {
            endpoint_url: "http://127.0.0.1:0/unreachable".to_owned(),
            model: "test-model".to_owned(),
            api_key: None,
            max_tokens: 512,
            temperature: 0.7,
        },
    }
}

/// Bundle a database and a scripted provider into handler state
pub fn create_test_resources(
    database: Database,
    llm_provider: Arc<dyn LlmProvider>,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        database,
        test_server_config(),
        llm_provider,
    ))
}

// ============================================================================
// Mock Chat Provider
// ============================================================================

/// Scripted chat-completion provider for route tests
///
/// Answers with a fixed reply (or failure) and records every request so tests
/// can assert on the assembled prompt without network access.
pub struct MockChatProvider {
    reply: Option<String>,
    fail: bool,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
}

impl MockChatProvider {
    /// Provider that always answers with `reply`
    pub fn with_reply(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_owned()),
            fail: false,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Provider whose every call fails with an upstream error
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            fail: true,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Provider that succeeds but returns a completion with no content
    pub fn empty_content() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            fail: false,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Number of completion calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request handed to the provider
    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockChatProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);

        if self.fail {
            return Err(AppError::external_service(
                "mock",
                "simulated upstream outage",
            ));
        }

        Ok(ChatCompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: self.reply.clone(),
                },
            }],
            usage: None,
        })
    }
}
