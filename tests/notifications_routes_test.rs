// ABOUTME: Integration tests for the notification routes
// ABOUTME: Tests per-user listing, read marking, and ownership guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use anyhow::Result;
use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};

use common::{create_test_database, create_test_resources, MockChatProvider};
use helpers::axum_test::AxumTestRequest;
use rehabflow_server::database::Database;
use rehabflow_server::models::NotificationType;
use rehabflow_server::routes::NotificationRoutes;

async fn setup() -> Result<(Database, Router)> {
    let database = create_test_database().await?;
    let resources = create_test_resources(database.clone(), MockChatProvider::with_reply("unused"));
    let router = NotificationRoutes::routes(resources);
    Ok((database, router))
}

#[tokio::test]
async fn test_list_is_scoped_to_the_user() -> Result<()> {
    let (database, router) = setup().await?;

    database
        .notifications()
        .create(
            "user-1",
            NotificationType::Achievement,
            "Milestone reached",
            "You completed week two",
            None,
        )
        .await?;
    database
        .notifications()
        .create(
            "user-2",
            NotificationType::Chat,
            "New reply",
            "Dr. Chen answered you",
            None,
        )
        .await?;

    let response = AxumTestRequest::get("/api/notifications")
        .header("x-user-id", "user-1")
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let notifications = body["notifications"].as_array().expect("array");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["title"], "Milestone reached");
    assert_eq!(notifications[0]["type"], "achievement");
    assert_eq!(notifications[0]["read"], false);
    Ok(())
}

#[tokio::test]
async fn test_mark_read_flips_the_flag() -> Result<()> {
    let (database, router) = setup().await?;

    let created = database
        .notifications()
        .create(
            "user-1",
            NotificationType::Exercise,
            "Daily reminder",
            "Time for your mobility routine",
            Some(&json!({"routine": "morning"})),
        )
        .await?;

    let response = AxumTestRequest::post(&format!("/api/notifications/{}/read", created.id))
        .header("x-user-id", "user-1")
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = AxumTestRequest::get("/api/notifications")
        .header("x-user-id", "user-1")
        .send(router)
        .await;
    let body: Value = response.json();
    assert_eq!(body["notifications"][0]["read"], true);
    assert_eq!(body["notifications"][0]["metadata"]["routine"], "morning");
    Ok(())
}

#[tokio::test]
async fn test_mark_read_rejects_foreign_notification() -> Result<()> {
    let (database, router) = setup().await?;

    let created = database
        .notifications()
        .create(
            "user-1",
            NotificationType::Doctor,
            "Care plan updated",
            "Review your new exercises",
            None,
        )
        .await?;

    let response = AxumTestRequest::post(&format!("/api/notifications/{}/read", created.id))
        .header("x-user-id", "user-2")
        .send(router.clone())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Notification not found");

    // Still unread for the owner
    let response = AxumTestRequest::get("/api/notifications")
        .header("x-user-id", "user-1")
        .send(router)
        .await;
    let listing: Value = response.json();
    assert_eq!(listing["notifications"][0]["read"], false);
    Ok(())
}

#[tokio::test]
async fn test_mark_read_unknown_id_returns_404() -> Result<()> {
    let (_database, router) = setup().await?;

    let response = AxumTestRequest::post("/api/notifications/no-such-id/read")
        .header("x-user-id", "user-1")
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_notifications_require_user_header() -> Result<()> {
    let (_database, router) = setup().await?;

    let response = AxumTestRequest::get("/api/notifications").send(router.clone()).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = AxumTestRequest::post("/api/notifications/some-id/read")
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    Ok(())
}
