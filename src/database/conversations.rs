// ABOUTME: Database operations for chat conversations and messages
// ABOUTME: Atomic find-or-create per (user, doctor) pair plus ordered history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{ChatMessageRecord, ConversationRecord, MessageType, SenderType};

// ============================================================================
// Conversation Manager
// ============================================================================

/// Conversation and chat message database operations
pub struct ConversationManager {
    pool: SqlitePool,
}

impl ConversationManager {
    /// Create a new conversation manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Conversation Operations
    // ========================================================================

    /// Find the conversation for a (user, doctor) pair, creating it if absent
    ///
    /// The insert relies on the `UNIQUE(user_id, doctor_id)` constraint, so
    /// two concurrent first-time opens converge on the same row instead of
    /// racing a check-then-insert.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn find_or_create(
        &self,
        user_id: &str,
        doctor_id: &str,
    ) -> AppResult<ConversationRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO chat_conversations (id, user_id, doctor_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, doctor_id) DO NOTHING
            ",
        )
        .bind(&id)
        .bind(user_id)
        .bind(doctor_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create conversation: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT id, user_id, doctor_id, created_at, updated_at
            FROM chat_conversations
            WHERE user_id = $1 AND doctor_id = $2
            ",
        )
        .bind(user_id)
        .bind(doctor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load conversation: {e}")))?;

        Ok(ConversationRecord {
            id: row.get("id"),
            user_id: row.get("user_id"),
            doctor_id: row.get("doctor_id"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    /// Get a conversation by ID, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<Option<ConversationRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, doctor_id, created_at, updated_at
            FROM chat_conversations
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get conversation: {e}")))?;

        Ok(row.map(|r| ConversationRecord {
            id: r.get("id"),
            user_id: r.get("user_id"),
            doctor_id: r.get("doctor_id"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    // ========================================================================
    // Message Operations
    // ========================================================================

    /// Append a message to a conversation the user owns
    ///
    /// The insert is guarded so a message can only land in a conversation
    /// belonging to `user_id`; the conversation's `updated_at` is touched on
    /// success. Messages are append-only — there is no edit or delete path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the conversation does not exist or
    /// belongs to another user, or a database error otherwise.
    pub async fn add_message(
        &self,
        conversation_id: &str,
        user_id: &str,
        sender_type: SenderType,
        content: &str,
        message_type: MessageType,
        metadata: Option<&serde_json::Value>,
    ) -> AppResult<ChatMessageRecord> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let metadata_json = metadata.map(serde_json::Value::to_string);

        // Insert only if the conversation belongs to the user
        let result = sqlx::query(
            r"
            INSERT INTO chat_messages (id, conversation_id, sender_type, content, message_type, metadata, created_at)
            SELECT $1, $2, $3, $4, $5, $6, $7
            WHERE EXISTS (
                SELECT 1 FROM chat_conversations WHERE id = $2 AND user_id = $8
            )
            ",
        )
        .bind(&id)
        .bind(conversation_id)
        .bind(sender_type.as_str())
        .bind(content)
        .bind(message_type.as_str())
        .bind(&metadata_json)
        .bind(&now)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add message: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Conversation not found or access denied",
            ));
        }

        sqlx::query(
            r"
            UPDATE chat_conversations
            SET updated_at = $1
            WHERE id = $2 AND user_id = $3
            ",
        )
        .bind(&now)
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update conversation timestamp: {e}")))?;

        Ok(ChatMessageRecord {
            id,
            conversation_id: conversation_id.to_owned(),
            sender_type: sender_type.as_str().to_owned(),
            content: content.to_owned(),
            message_type: message_type.as_str().to_owned(),
            metadata: metadata.cloned(),
            created_at: now,
        })
    }

    /// Get all messages for a conversation in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get_messages(
        &self,
        conversation_id: &str,
        user_id: &str,
    ) -> AppResult<Vec<ChatMessageRecord>> {
        let rows = sqlx::query(
            r"
            SELECT m.id, m.conversation_id, m.sender_type, m.content, m.message_type, m.metadata, m.created_at
            FROM chat_messages m
            JOIN chat_conversations c ON m.conversation_id = c.id
            WHERE m.conversation_id = $1 AND c.user_id = $2
            ORDER BY m.created_at ASC
            ",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get messages: {e}")))?;

        Ok(rows.into_iter().map(map_message_row).collect())
    }

    /// Get the last N messages of a conversation in chronological order
    ///
    /// Used by the chat proxy to bound prompt context: older messages are
    /// silently dropped. The proxy is invoked without a caller identity, so
    /// this lookup is by conversation ID alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub async fn get_recent_messages(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> AppResult<Vec<ChatMessageRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, conversation_id, sender_type, content, message_type, metadata, created_at
            FROM chat_messages
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(conversation_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recent messages: {e}")))?;

        // Reverse to get chronological order
        let mut messages: Vec<ChatMessageRecord> =
            rows.into_iter().map(map_message_row).collect();
        messages.reverse();

        Ok(messages)
    }
}

/// Map a message row, tolerating unparseable stored metadata
fn map_message_row(r: sqlx::sqlite::SqliteRow) -> ChatMessageRecord {
    let metadata: Option<String> = r.get("metadata");
    ChatMessageRecord {
        id: r.get("id"),
        conversation_id: r.get("conversation_id"),
        sender_type: r.get("sender_type"),
        content: r.get("content"),
        message_type: r.get("message_type"),
        metadata: metadata.and_then(|raw| serde_json::from_str(&raw).ok()),
        created_at: r.get("created_at"),
    }
}
