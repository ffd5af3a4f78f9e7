// ABOUTME: Integration tests for the health record routes
// ABOUTME: Tests metadata registration, per-user listing, and deletion
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
use rehabflow_server::models::HealthRecord;
use rehabflow_server::routes::HealthRecordRoutes;

async fn setup() -> Result<Router> {
    let database = create_test_database().await?;
    let resources = create_test_resources(database, MockChatProvider::with_reply("unused"));
    Ok(HealthRecordRoutes::routes(resources))
}

/// Register a record as `user_id` and return it
async fn create_record(router: &Router, user_id: &str, file_name: &str) -> HealthRecord {
    let response = AxumTestRequest::post("/api/health-records")
        .header("x-user-id", user_id)
        .json(&json!({
            "file_name": file_name,
            "file_url": format!("https://storage.example.com/{file_name}"),
            "file_type": "application/pdf",
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_create_and_list_records() -> Result<()> {
    let router = setup().await?;

    let record = create_record(&router, "user-1", "mri-results.pdf").await;
    assert_eq!(record.user_id, "user-1");
    assert_eq!(record.file_name, "mri-results.pdf");
    assert_eq!(record.file_type.as_deref(), Some("application/pdf"));

    let response = AxumTestRequest::get("/api/health-records")
        .header("x-user-id", "user-1")
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let records = body["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["file_name"], "mri-results.pdf");
    Ok(())
}

#[tokio::test]
async fn test_records_are_per_user() -> Result<()> {
    let router = setup().await?;

    create_record(&router, "user-1", "mri-results.pdf").await;

    let response = AxumTestRequest::get("/api/health-records")
        .header("x-user-id", "user-2")
        .send(router)
        .await;

    let body: Value = response.json();
    assert_eq!(body["records"].as_array().expect("array").len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_create_requires_name_and_url() -> Result<()> {
    let router = setup().await?;

    let bodies = [
        json!({"file_name": "", "file_url": "https://storage.example.com/x.pdf"}),
        json!({"file_name": "x.pdf", "file_url": ""}),
    ];

    for body in bodies {
        let response = AxumTestRequest::post("/api/health-records")
            .header("x-user-id", "user-1")
            .json(&body)
            .send(router.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["error"], "File name and URL are required");
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_removes_own_record_only() -> Result<()> {
    let router = setup().await?;

    let record = create_record(&router, "user-1", "mri-results.pdf").await;

    // Someone else cannot delete it
    let response = AxumTestRequest::delete(&format!("/api/health-records/{}", record.id))
        .header("x-user-id", "user-2")
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["error"], "Health record not found");

    // The owner can
    let response = AxumTestRequest::delete(&format!("/api/health-records/{}", record.id))
        .header("x-user-id", "user-1")
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = AxumTestRequest::get("/api/health-records")
        .header("x-user-id", "user-1")
        .send(router)
        .await;
    let body: Value = response.json();
    assert_eq!(body["records"].as_array().expect("array").len(), 0);
    Ok(())
}

#[tokio::test]
async fn test_health_records_require_user_header() -> Result<()> {
    let router = setup().await?;

    let response = AxumTestRequest::get("/api/health-records").send(router.clone()).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = AxumTestRequest::post("/api/health-records")
        .json(&json!({"file_name": "x.pdf", "file_url": "https://storage.example.com/x.pdf"}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    Ok(())
}
