// ABOUTME: Environment variable parsing for server and inference configuration
// ABOUTME: Ships with production defaults; every knob can be overridden per deployment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Environment-based server configuration.
//!
//! Recognized variables:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `REHABFLOW_HTTP_PORT` | `8081` |
//! | `DATABASE_URL` | `sqlite:./data/rehabflow.db` |
//! | `REHABFLOW_INFERENCE_URL` | Hugging Face Mistral-7B chat completions |
//! | `REHABFLOW_INFERENCE_MODEL` | `mistralai/Mistral-7B-Instruct-v0.1` |
//! | `HUGGINGFACE_API_KEY` | unset (requests go out unauthenticated) |
//! | `REHABFLOW_MAX_TOKENS` | `512` |
//! | `REHABFLOW_TEMPERATURE` | `0.7` |

use std::env;

use crate::errors::{AppError, AppResult};

/// Default HTTP port for the REST surface
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default SQLite database location
const DEFAULT_DATABASE_URL: &str = "sqlite:./data/rehabflow.db";

/// Default chat-completions endpoint
const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1/v1/chat/completions";

/// Default model identifier sent in the request body
const DEFAULT_INFERENCE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";

/// Default bound on generated tokens per reply
const DEFAULT_MAX_TOKENS: u32 = 512;

/// Default sampling temperature
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for the outbound chat-completion call
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Full chat-completions endpoint URL
    pub endpoint_url: String,
    /// Model identifier sent in the request body
    pub model: String,
    /// Bearer token for the inference API, if required
    pub api_key: Option<String>,
    /// Upper bound on generated tokens per reply
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_INFERENCE_URL.to_owned(),
            model: DEFAULT_INFERENCE_MODEL.to_owned(),
            api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP server binds to
    pub http_port: u16,
    /// Database connection URL
    pub database_url: String,
    /// Outbound inference settings
    pub inference: InferenceConfig,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a numeric variable is set but does not
    /// parse.
    pub fn from_env() -> AppResult<Self> {
        let http_port = parse_env("REHABFLOW_HTTP_PORT", DEFAULT_HTTP_PORT)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let inference = InferenceConfig {
            endpoint_url: env::var("REHABFLOW_INFERENCE_URL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_URL.to_owned()),
            model: env::var("REHABFLOW_INFERENCE_MODEL")
                .unwrap_or_else(|_| DEFAULT_INFERENCE_MODEL.to_owned()),
            api_key: env::var("HUGGINGFACE_API_KEY").ok(),
            max_tokens: parse_env("REHABFLOW_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            temperature: parse_env("REHABFLOW_TEMPERATURE", DEFAULT_TEMPERATURE)?,
        };

        Ok(Self {
            http_port,
            database_url,
            inference,
        })
    }
}

/// Read an environment variable and parse it, falling back to a default when
/// the variable is unset.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("Invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}
