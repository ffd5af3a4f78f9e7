// ABOUTME: Configuration module for the RehabFlow server
// ABOUTME: Environment-only configuration loaded once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Server configuration.
//!
//! All configuration comes from environment variables, read once at startup
//! by [`environment::ServerConfig::from_env`] and passed down explicitly.
//! There is no ambient global configuration state.

pub mod environment;

pub use environment::{InferenceConfig, ServerConfig};
