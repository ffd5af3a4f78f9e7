// ABOUTME: Hugging Face chat-completions client over reqwest
// ABOUTME: One synchronous call per invocation; no retry, backoff, or streaming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use async_trait::async_trait;
use tracing::debug;

use crate::config::InferenceConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::llm::LlmProvider;

/// Upstream service name used in errors and logs
const SERVICE_NAME: &str = "huggingface";

/// Chat-completion client for the Hugging Face inference API
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl HuggingFaceProvider {
    /// Create a new provider from inference configuration
    #[must_use]
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let mut http_request = self.client.post(&self.config.endpoint_url).json(&request);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("API error {status}: {body}"),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })
    }
}
