// ABOUTME: LLM provider abstraction for the doctor chat pipeline
// ABOUTME: Trait seam over the HTTP client so tests can inject mock providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! LLM integration.
//!
//! The chat proxy talks to the model through the [`LlmProvider`] trait; the
//! production implementation is [`HuggingFaceProvider`]. Wire types follow
//! the OpenAI-compatible chat-completions shape the endpoint accepts.

pub mod huggingface;
pub mod prompts;
pub mod types;

pub use huggingface::HuggingFaceProvider;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ResponseMessage, Usage};

use async_trait::async_trait;

use crate::errors::AppResult;

/// Chat-completion provider seam
///
/// One call per chat turn. Implementations must not retry internally; the
/// caller degrades to a fixed fallback on the first failure.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Perform a single synchronous chat completion
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, returns a non-success status, or
    /// the body cannot be parsed.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse>;
}
