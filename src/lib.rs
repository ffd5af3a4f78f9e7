// ABOUTME: Main library entry point for the RehabFlow patient platform server
// ABOUTME: Provides the REST API, doctor chat proxy, and SQLite-backed data store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

// Crate-level attributes:
// - recursion_limit: Increased from default 128 to 256 for derive macros
//   (serde, thiserror) on nested response types
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # RehabFlow Server
//!
//! Backend for the RehabFlow rehabilitation companion app. Patients chat
//! with doctor personas backed by a chat-completion model, track their
//! recovery profile, browse a community feed, and keep health documents
//! and doctor reviews in one place.
//!
//! ## Features
//!
//! - **Doctor chat proxy**: Persona-prompted chat completions with recent
//!   conversation context and graceful fallbacks when the model is down
//! - **Conversations**: One durable thread per patient and doctor pair
//! - **Community feed**: Categorized posts with like counts
//! - **Recovery data**: Profiles, notifications, health records, reviews
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rehabflow_server::config::environment::ServerConfig;
//! use rehabflow_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("RehabFlow server configured with port: HTTP={}",
//!              config.http_port);
//!
//!     Ok(())
//! }
//! ```

/// Configuration management loaded from the environment at startup
pub mod config;

/// SQLite data store and per-table managers
pub mod database;

/// Unified error handling with HTTP response mapping
pub mod errors;

/// Reply text formatting for readable numbered lists
pub mod formatters;

/// Chat-completion provider abstraction and the Hugging Face client
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for patients, doctors, and conversations
pub mod models;

/// HTTP routes organized by domain
pub mod routes;

/// Server resources and router assembly
pub mod server;
