// ABOUTME: Tracing subscriber setup for server and seed binaries
// ABOUTME: Env-filtered output with an optional JSON mode for log shippers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Structured logging initialization.
//!
//! Filtering follows `RUST_LOG` when set, otherwise the default passed by the
//! binary. Setting `REHABFLOW_LOG_FORMAT=json` switches to newline-delimited
//! JSON output.

use tracing_subscriber::EnvFilter;

use crate::errors::{AppError, AppResult};

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(default_filter: &str) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_output = std::env::var("REHABFLOW_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json_output {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AppError::config(format!("Failed to initialize logging: {e}")))
}
