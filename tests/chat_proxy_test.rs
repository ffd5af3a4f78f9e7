// ABOUTME: Integration tests for the chat proxy endpoint
// ABOUTME: Covers validation, persona assembly, history windowing, and fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{create_test_database, create_test_resources, seed_test_doctor, MockChatProvider};
use helpers::axum_test::AxumTestRequest;
use rehabflow_server::llm::prompts::{
    CONNECTIVITY_FALLBACK, EMPTY_RESPONSE_FALLBACK, INTERNAL_ERROR_FALLBACK,
};
use rehabflow_server::models::Doctor;
use rehabflow_server::routes::ChatRoutes;
use rehabflow_server::server::ServerResources;

/// Database with one seeded doctor, wired to the given provider
async fn setup(provider: Arc<MockChatProvider>) -> Result<(Arc<ServerResources>, Doctor)> {
    let database = create_test_database().await?;
    let doctor =
        seed_test_doctor(&database, "doctor-1", "Dr. Sarah Chen", "Physical Therapy").await?;
    let resources = create_test_resources(database, provider);
    Ok((resources, doctor))
}

fn chat_router(resources: &Arc<ServerResources>) -> Router {
    ChatRoutes::routes(resources.clone())
}

/// Insert a message with a controlled timestamp so ordering is deterministic
async fn insert_message(
    resources: &ServerResources,
    conversation_id: &str,
    sender_type: &str,
    content: &str,
    created_at: &str,
) -> Result<()> {
    sqlx::query(
        r"
        INSERT INTO chat_messages (id, conversation_id, sender_type, content, message_type, metadata, created_at)
        VALUES ($1, $2, $3, $4, 'text', NULL, $5)
        ",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(conversation_id)
    .bind(sender_type)
    .bind(content)
    .bind(created_at)
    .execute(resources.database.pool())
    .await?;
    Ok(())
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_chat_requires_message_and_doctor_id() -> Result<()> {
    let provider = MockChatProvider::with_reply("unused");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let bodies = [
        json!({}),
        json!({"message": "My knee hurts"}),
        json!({"doctorId": "doctor-1"}),
        json!({"message": "", "doctorId": "doctor-1"}),
    ];

    for body in bodies {
        let response = AxumTestRequest::post("/api/chat")
            .json(&body)
            .send(router.clone())
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json, json!({"error": "Message and doctorId are required"}));
    }

    assert_eq!(provider.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_chat_unknown_doctor_returns_404() -> Result<()> {
    let provider = MockChatProvider::with_reply("unused");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello", "doctorId": "doctor-unknown"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let json: Value = response.json();
    assert_eq!(json, json!({"error": "Doctor not found"}));
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

// ============================================================================
// Successful Replies
// ============================================================================

#[tokio::test]
async fn test_chat_returns_reply_with_doctor_attribution() -> Result<()> {
    let provider = MockChatProvider::with_reply("Rest today and ice the knee.");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "My knee is swollen", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["response"], "Rest today and ice the knee.");
    assert_eq!(json["doctorName"], "Dr. Sarah Chen");
    assert_eq!(json["specialty"], "Physical Therapy");
    assert!(json.get("error").is_none());
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_chat_sends_persona_prompt_and_new_message() -> Result<()> {
    let provider = MockChatProvider::with_reply("Noted.");
    let (resources, doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Can I start cycling again?", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    let request = provider.last_request().expect("provider was not called");
    assert_eq!(request.model, "test-model");
    assert_eq!(request.max_tokens, Some(512));
    assert_eq!(request.temperature, Some(0.7));
    assert!(!request.stream);

    // No conversation id: just the persona instruction and the new message
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert!(request.messages[0].content.contains(&doctor.name));
    assert!(request.messages[0].content.contains(&doctor.specialty));
    assert!(request.messages[0].content.contains("12 years"));
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[1].content, "Can I start cycling again?");
    Ok(())
}

// ============================================================================
// History Windowing
// ============================================================================

#[tokio::test]
async fn test_chat_includes_last_ten_messages_in_order() -> Result<()> {
    let provider = MockChatProvider::with_reply("Keep going.");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let conversation = resources
        .database
        .conversations()
        .find_or_create("user-1", "doctor-1")
        .await?;

    // Twelve messages, alternating sender, one second apart
    for i in 0..12 {
        let sender = if i % 2 == 0 { "user" } else { "ai" };
        insert_message(
            &resources,
            &conversation.id,
            sender,
            &format!("m{i:02}"),
            &format!("2026-01-15T10:00:{i:02}+00:00"),
        )
        .await?;
    }

    AxumTestRequest::post("/api/chat")
        .json(&json!({
            "message": "How should I progress this week?",
            "doctorId": "doctor-1",
            "conversationId": conversation.id,
        }))
        .send(router)
        .await;

    let request = provider.last_request().expect("provider was not called");

    // System prompt + 10 most recent + the new message; m00 and m01 fall out
    assert_eq!(request.messages.len(), 12);
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[1].content, "m02");
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[2].content, "m03");
    assert_eq!(request.messages[2].role, "assistant");
    assert_eq!(request.messages[10].content, "m11");
    assert_eq!(request.messages[10].role, "assistant");
    assert_eq!(request.messages[11].role, "user");
    assert_eq!(request.messages[11].content, "How should I progress this week?");
    Ok(())
}

#[tokio::test]
async fn test_chat_empty_conversation_id_means_no_history() -> Result<()> {
    let provider = MockChatProvider::with_reply("Fresh start.");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello", "doctorId": "doctor-1", "conversationId": ""}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let request = provider.last_request().expect("provider was not called");
    assert_eq!(request.messages.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_chat_unknown_conversation_id_means_no_history() -> Result<()> {
    let provider = MockChatProvider::with_reply("Hi there.");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({
            "message": "Hello",
            "doctorId": "doctor-1",
            "conversationId": "no-such-conversation",
        }))
        .send(router)
        .await;

    // An unknown id yields an empty window, not an error
    assert_eq!(response.status_code(), StatusCode::OK);
    let request = provider.last_request().expect("provider was not called");
    assert_eq!(request.messages.len(), 2);
    Ok(())
}

// ============================================================================
// Fallback Replies
// ============================================================================

#[tokio::test]
async fn test_chat_provider_failure_degrades_to_connectivity_fallback() -> Result<()> {
    let provider = MockChatProvider::failing();
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "My shoulder aches", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    // Upstream failure is shielded: success status, canned reply, attribution kept
    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["response"], CONNECTIVITY_FALLBACK);
    assert_eq!(json["doctorName"], "Dr. Sarah Chen");
    assert_eq!(json["specialty"], "Physical Therapy");
    assert!(json.get("error").is_none());
    assert_eq!(provider.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_chat_empty_completion_degrades_to_retry_prompt() -> Result<()> {
    let provider = MockChatProvider::empty_content();
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Are you there?", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["response"], EMPTY_RESPONSE_FALLBACK);
    assert_eq!(json["doctorName"], "Dr. Sarah Chen");
    Ok(())
}

#[tokio::test]
async fn test_chat_internal_failure_returns_500_with_generic_fallback() -> Result<()> {
    let provider = MockChatProvider::with_reply("unused");
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let conversation = resources
        .database
        .conversations()
        .find_or_create("user-1", "doctor-1")
        .await?;

    // Break the history query out from under the handler
    sqlx::query("DROP TABLE chat_messages")
        .execute(resources.database.pool())
        .await?;

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({
            "message": "Hello",
            "doctorId": "doctor-1",
            "conversationId": conversation.id,
        }))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["response"], INTERNAL_ERROR_FALLBACK);
    assert_eq!(json["error"], "Internal server error");
    // Attribution is dropped on internal errors
    assert!(json.get("doctorName").is_none());
    assert!(json.get("specialty").is_none());
    assert_eq!(provider.call_count(), 0);
    Ok(())
}

// ============================================================================
// Reply Formatting
// ============================================================================

#[tokio::test]
async fn test_chat_renumbers_long_unstructured_reply() -> Result<()> {
    let provider = MockChatProvider::with_reply(
        "You should rest your knee and avoid stairs for now. \
         Ice the joint for twenty minutes twice a day. \
         Keep gentle range of motion exercises going every morning. \
         Call me if the swelling has not gone down by Friday.",
    );
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "What should I do?", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(
        json["response"],
        "You should rest your knee and avoid stairs for now.\n\n\
         1. Ice the joint for twenty minutes twice a day.\n\
         2. Keep gentle range of motion exercises going every morning.\n\
         3. Call me if the swelling has not gone down by Friday."
    );
    Ok(())
}

#[tokio::test]
async fn test_chat_leaves_already_numbered_reply_untouched() -> Result<()> {
    let reply = "Here is your plan:\n\n1. Rest for two days\n2. Ice in the evening\n3. Light stretching after";
    let provider = MockChatProvider::with_reply(reply);
    let (resources, _doctor) = setup(provider.clone()).await?;
    let router = chat_router(&resources);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "What should I do?", "doctorId": "doctor-1"}))
        .send(router)
        .await;

    let json: Value = response.json();
    assert_eq!(json["response"], reply);
    Ok(())
}
