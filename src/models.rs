// ABOUTME: Domain records and discriminator enums for the RehabFlow store
// ABOUTME: Records mirror table rows; enums validate discriminator columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Domain model types.
//!
//! Records carry timestamps as RFC 3339 strings, matching how they are stored.
//! Discriminator columns (`sender_type`, `message_type`, notification `type`,
//! post `category`) are kept as plain strings on the records; the enums here
//! validate inbound values at the API boundary before anything is written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

// ============================================================================
// Discriminators
// ============================================================================

/// Party that authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderType {
    /// Human patient
    User,
    /// Assistant reply attributed to the doctor persona
    Ai,
}

impl SenderType {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

impl FromStr for SenderType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "ai" => Ok(Self::Ai),
            other => Err(AppError::invalid_input(format!(
                "Invalid sender type: {other}"
            ))),
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload kind of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Plain text
    Text,
    /// Exercise card with structured metadata
    Exercise,
    /// Image reference
    Image,
}

impl MessageType {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Exercise => "exercise",
            Self::Image => "image",
        }
    }
}

impl FromStr for MessageType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "exercise" => Ok(Self::Exercise),
            "image" => Ok(Self::Image),
            other => Err(AppError::invalid_input(format!(
                "Invalid message type: {other}"
            ))),
        }
    }
}

/// Kind of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// New chat activity
    Chat,
    /// Exercise reminder
    Exercise,
    /// Recovery milestone reached
    Achievement,
    /// Update from a doctor
    Doctor,
}

impl NotificationType {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Exercise => "exercise",
            Self::Achievement => "achievement",
            Self::Doctor => "doctor",
        }
    }
}

impl FromStr for NotificationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Self::Chat),
            "exercise" => Ok(Self::Exercise),
            "achievement" => Ok(Self::Achievement),
            "doctor" => Ok(Self::Doctor),
            other => Err(AppError::invalid_input(format!(
                "Invalid notification type: {other}"
            ))),
        }
    }
}

/// Community feed category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostCategory {
    /// General community discussion
    General,
    /// Posts from the user's preferred doctor
    MyDoctor,
    /// Exercise technique and routine tips
    ExerciseTips,
    /// Recovery stories and motivation
    Inspiration,
}

impl PostCategory {
    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::MyDoctor => "my_doctor",
            Self::ExerciseTips => "exercise_tips",
            Self::Inspiration => "inspiration",
        }
    }
}

impl FromStr for PostCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "my_doctor" => Ok(Self::MyDoctor),
            "exercise_tips" => Ok(Self::ExerciseTips),
            "inspiration" => Ok(Self::Inspiration),
            other => Err(AppError::invalid_input(format!(
                "Invalid post category: {other}"
            ))),
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Doctor reference data used for persona construction and display
///
/// Administered by the seed tooling; read-only from the application's
/// perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// Doctor ID
    pub id: String,
    /// Display name, e.g. "Dr. Sarah Chen"
    pub name: String,
    /// Specialty, e.g. "Physical Therapy"
    pub specialty: String,
    /// Years of professional experience
    pub years_experience: i64,
    /// Aggregate rating (0.0 - 5.0)
    pub rating: f64,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

/// Per-user demographic and recovery profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// User ID (primary key, assigned by the identity provider)
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Free-form location
    pub location: Option<String>,
    /// Injury being rehabilitated
    pub injury_type: Option<String>,
    /// Free-form recovery goals
    pub recovery_goals: Option<String>,
    /// Preferred doctor ID
    pub preferred_doctor: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Mutable profile fields, as submitted by the profile editor
///
/// Writes are whole-row last-write-wins: the submitted fields replace the
/// stored ones with no optimistic concurrency check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Display name
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Free-form location
    pub location: Option<String>,
    /// Injury being rehabilitated
    pub injury_type: Option<String>,
    /// Free-form recovery goals
    pub recovery_goals: Option<String>,
    /// Preferred doctor ID
    pub preferred_doctor: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
}

/// Persistent thread of messages between one user and one doctor persona
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Conversation ID
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Doctor the thread is with
    pub doctor_id: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last activity timestamp
    pub updated_at: String,
}

/// One message within a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    /// Message ID
    pub id: String,
    /// Parent conversation ID
    pub conversation_id: String,
    /// `user` or `ai`
    pub sender_type: String,
    /// Message body
    pub content: String,
    /// `text`, `exercise`, or `image`
    pub message_type: String,
    /// Opaque structured payload (exercise details, image info)
    pub metadata: Option<Value>,
    /// Creation timestamp
    pub created_at: String,
}

/// Community feed post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post ID
    pub id: String,
    /// Authoring user or doctor ID
    pub author_id: Option<String>,
    /// Author display name (denormalized for rendering)
    pub author_name: String,
    /// Author avatar URL or initials
    pub author_avatar: Option<String>,
    /// Author title shown under the name
    pub author_title: Option<String>,
    /// Whether the author is a verified professional
    pub author_verified: bool,
    /// Feed category
    pub category: String,
    /// Post body
    pub content: String,
    /// Attached image URL
    pub image_url: Option<String>,
    /// Like count
    pub likes: i64,
    /// Comment count
    pub comments: i64,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Creation timestamp
    pub created_at: String,
}

/// Fields for a new feed post, with author details already resolved
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Authoring user or doctor ID
    pub author_id: Option<String>,
    /// Author display name
    pub author_name: String,
    /// Author avatar URL or initials
    pub author_avatar: Option<String>,
    /// Author title shown under the name
    pub author_title: Option<String>,
    /// Whether the author is a verified professional
    pub author_verified: bool,
    /// Feed category (already validated)
    pub category: String,
    /// Post body
    pub content: String,
    /// Attached image URL
    pub image_url: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
}

/// User notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID
    pub id: String,
    /// Recipient user ID
    pub user_id: String,
    /// Notification kind
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Short title
    pub title: String,
    /// Body text
    pub message: String,
    /// Whether the user has seen it
    pub read: bool,
    /// Opaque structured payload
    pub metadata: Option<Value>,
    /// Creation timestamp
    pub created_at: String,
}

/// Uploaded health record reference; the file itself lives in object storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Record ID
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Original file name
    pub file_name: String,
    /// Publicly resolvable URL, stored as an opaque string
    pub file_url: String,
    /// MIME type if known
    pub file_type: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

/// Patient review of a doctor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorReview {
    /// Review ID
    pub id: String,
    /// Reviewing user ID
    pub user_id: String,
    /// Reviewed doctor ID
    pub doctor_id: String,
    /// Rating, 1 through 5
    pub rating: i64,
    /// Optional free-form review text
    pub review_text: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}
