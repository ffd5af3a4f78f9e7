// ABOUTME: Chat route handlers for the doctor chat proxy and conversation management
// ABOUTME: Provides REST endpoints for chat completions, opening conversations, and message history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Chat routes for doctor conversations
//!
//! The proxy endpoint validates the request, resolves the doctor persona,
//! assembles recent history into a chat-completion request, and shields the
//! client from upstream failures with canned fallback replies. Conversation
//! endpoints require the gateway-populated user header.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::config::InferenceConfig;
use crate::errors::AppError;
use crate::formatters::ensure_numbered_format;
use crate::llm::prompts::{
    doctor_greeting, doctor_system_prompt, CONNECTIVITY_FALLBACK, EMPTY_RESPONSE_FALLBACK,
    INTERNAL_ERROR_FALLBACK,
};
use crate::llm::{ChatCompletionRequest, ChatMessage};
use crate::models::{ChatMessageRecord, ConversationRecord, Doctor, MessageType, SenderType};
use crate::routes::authenticated_user;
use crate::server::ServerResources;

// ============================================================================
// Constants
// ============================================================================

/// Number of most recent stored messages sent to the model as context
const CHAT_HISTORY_LIMIT: i64 = 10;

/// Id used for the synthesized greeting in otherwise empty conversations.
/// The greeting is never persisted, so it needs a stable non-colliding id.
const GREETING_MESSAGE_ID: &str = "greeting";

// ============================================================================
// Request and Response Types
// ============================================================================

/// Request body for the chat proxy endpoint
#[derive(Debug, Deserialize)]
struct ChatProxyRequest {
    /// Patient message text
    #[serde(default)]
    message: String,
    /// Doctor persona to answer as
    #[serde(rename = "doctorId", default)]
    doctor_id: String,
    /// Conversation whose recent history seeds the model context
    #[serde(rename = "conversationId", default)]
    conversation_id: Option<String>,
}

/// Response body for the chat proxy endpoint
#[derive(Debug, Serialize)]
struct ChatProxyResponse {
    /// Reply text shown to the patient
    response: String,
    /// Doctor display name, omitted on internal errors
    #[serde(rename = "doctorName", skip_serializing_if = "Option::is_none")]
    doctor_name: Option<String>,
    /// Doctor specialty, omitted on internal errors
    #[serde(skip_serializing_if = "Option::is_none")]
    specialty: Option<String>,
    /// Error marker, present only on internal errors
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Request body for opening a conversation with a doctor
#[derive(Debug, Deserialize)]
struct OpenConversationRequest {
    /// Doctor to converse with
    #[serde(rename = "doctorId")]
    doctor_id: String,
}

/// Response body for an opened conversation
#[derive(Debug, Serialize)]
struct ConversationResponse {
    /// The conversation row, created on first open
    conversation: ConversationRecord,
    /// Stored messages in chronological order, or a synthesized greeting
    messages: Vec<ChatMessageRecord>,
}

/// Request body for appending a message to a conversation
#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    /// Who authored the message: `user` or `ai`
    sender_type: String,
    /// Message text
    content: String,
    /// Message kind, defaults to `text`
    #[serde(default)]
    message_type: Option<String>,
    /// Optional structured payload stored with the message
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

/// Response body for a message listing
#[derive(Debug, Serialize)]
struct MessagesResponse {
    /// Stored messages in chronological order
    messages: Vec<ChatMessageRecord>,
}

// ============================================================================
// Routes
// ============================================================================

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            // Proxy endpoint, callable without authentication
            .route("/api/chat", post(Self::chat_completion))
            // Conversation management
            .route("/api/chat/conversations", post(Self::open_conversation))
            .route(
                "/api/chat/conversations/:conversation_id/messages",
                get(Self::get_messages),
            )
            .route(
                "/api/chat/conversations/:conversation_id/messages",
                post(Self::send_message),
            )
            .with_state(resources)
    }

    /// POST /api/chat - proxy a patient message to the chat-completion model
    ///
    /// Expected failures (bad input, unknown doctor, upstream outage) are
    /// mapped to their own response bodies inside [`Self::process_chat`].
    /// Anything else lands here and becomes a 500 with a generic fallback
    /// reply, so the client always receives renderable text.
    async fn chat_completion(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ChatProxyRequest>,
    ) -> Response {
        match Self::process_chat(&resources, request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Chat proxy failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ChatProxyResponse {
                        response: INTERNAL_ERROR_FALLBACK.to_owned(),
                        doctor_name: None,
                        specialty: None,
                        error: Some("Internal server error".to_owned()),
                    }),
                )
                    .into_response()
            }
        }
    }

    /// Validate, resolve the doctor, call the model, and format the reply
    async fn process_chat(
        resources: &Arc<ServerResources>,
        request: ChatProxyRequest,
    ) -> Result<Response, AppError> {
        if request.message.is_empty() || request.doctor_id.is_empty() {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Message and doctorId are required"})),
            )
                .into_response());
        }

        let Some(doctor) = resources.database.doctors().get(&request.doctor_id).await? else {
            return Ok((
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Doctor not found"})),
            )
                .into_response());
        };

        // Absent or empty conversation id means a fresh exchange with no context
        let history = match request.conversation_id.as_deref().filter(|id| !id.is_empty()) {
            Some(conversation_id) => {
                resources
                    .database
                    .conversations()
                    .get_recent_messages(conversation_id, CHAT_HISTORY_LIMIT)
                    .await?
            }
            None => Vec::new(),
        };

        debug!(
            "Chat proxy request for doctor {} with {} history messages",
            doctor.id,
            history.len()
        );

        let llm_request = Self::build_llm_request(
            &resources.config.inference,
            &doctor,
            &history,
            &request.message,
        );

        let reply = match resources.llm_provider.chat_completion(llm_request).await {
            Ok(completion) => completion
                .first_content()
                .map_or_else(|| EMPTY_RESPONSE_FALLBACK.to_owned(), ToOwned::to_owned),
            Err(e) => {
                warn!("Chat completion failed for doctor {}: {e}", doctor.id);
                return Ok((
                    StatusCode::OK,
                    Json(ChatProxyResponse {
                        response: CONNECTIVITY_FALLBACK.to_owned(),
                        doctor_name: Some(doctor.name),
                        specialty: Some(doctor.specialty),
                        error: None,
                    }),
                )
                    .into_response());
            }
        };

        let formatted = ensure_numbered_format(&reply);

        Ok((
            StatusCode::OK,
            Json(ChatProxyResponse {
                response: formatted.into_owned(),
                doctor_name: Some(doctor.name),
                specialty: Some(doctor.specialty),
                error: None,
            }),
        )
            .into_response())
    }

    /// Assemble the chat-completion request: persona, recent history, new message
    fn build_llm_request(
        inference: &InferenceConfig,
        doctor: &Doctor,
        history: &[ChatMessageRecord],
        message: &str,
    ) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(doctor_system_prompt(doctor)));

        for record in history {
            if record.sender_type == SenderType::User.as_str() {
                messages.push(ChatMessage::user(record.content.clone()));
            } else {
                messages.push(ChatMessage::assistant(record.content.clone()));
            }
        }

        messages.push(ChatMessage::user(message));

        ChatCompletionRequest {
            model: inference.model.clone(),
            messages,
            max_tokens: Some(inference.max_tokens),
            temperature: Some(inference.temperature),
            stream: false,
        }
    }

    /// POST /api/chat/conversations - find or create the conversation with a doctor
    ///
    /// Returns the conversation and its messages in chronological order. A
    /// conversation with no stored messages gets a synthesized greeting from
    /// the doctor so the client has something to render; the greeting is not
    /// persisted.
    async fn open_conversation(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<OpenConversationRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let Some(doctor) = resources.database.doctors().get(&request.doctor_id).await? else {
            return Err(AppError::not_found("Doctor not found"));
        };

        let conversation = resources
            .database
            .conversations()
            .find_or_create(&user_id, &doctor.id)
            .await?;

        let mut messages = resources
            .database
            .conversations()
            .get_messages(&conversation.id, &user_id)
            .await?;

        if messages.is_empty() {
            messages.push(Self::greeting_message(&conversation, &doctor));
        }

        Ok((
            StatusCode::OK,
            Json(ConversationResponse {
                conversation,
                messages,
            }),
        )
            .into_response())
    }

    /// GET /api/chat/conversations/:conversation_id/messages - list stored messages
    async fn get_messages(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(conversation_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        let conversation = resources
            .database
            .conversations()
            .get(&conversation_id, &user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Conversation not found or access denied"))?;

        let messages = resources
            .database
            .conversations()
            .get_messages(&conversation.id, &user_id)
            .await?;

        Ok((StatusCode::OK, Json(MessagesResponse { messages })).into_response())
    }

    /// POST /api/chat/conversations/:conversation_id/messages - append a message
    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(conversation_id): Path<String>,
        Json(request): Json<SendMessageRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticated_user(&headers)?;

        if request.content.is_empty() {
            return Err(AppError::invalid_input("Message content is required"));
        }

        let sender_type: SenderType = request.sender_type.parse()?;
        let message_type: MessageType = match request.message_type.as_deref() {
            Some(raw) => raw.parse()?,
            None => MessageType::Text,
        };

        let message = resources
            .database
            .conversations()
            .add_message(
                &conversation_id,
                &user_id,
                sender_type,
                &request.content,
                message_type,
                request.metadata.as_ref(),
            )
            .await?;

        Ok((StatusCode::CREATED, Json(message)).into_response())
    }

    /// Synthesize the doctor's opening greeting for an empty conversation
    fn greeting_message(conversation: &ConversationRecord, doctor: &Doctor) -> ChatMessageRecord {
        ChatMessageRecord {
            id: GREETING_MESSAGE_ID.to_owned(),
            conversation_id: conversation.id.clone(),
            sender_type: SenderType::Ai.as_str().to_owned(),
            content: doctor_greeting(doctor),
            message_type: MessageType::Text.as_str().to_owned(),
            metadata: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
