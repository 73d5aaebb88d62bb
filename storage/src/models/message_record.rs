//! Message record model for persistence.
//!
//! Maps to the `messages` table; rows are immutable once inserted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row from the messages table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    /// Primary key (UUID).
    pub id: String,
    /// Telegram id of the author.
    pub user_id: i64,
    /// Chat the message was posted in.
    pub chat_id: i64,
    /// Message body.
    pub content: String,
    /// When the message occurred on the platform.
    pub sent_at: DateTime<Utc>,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates a new record with a generated UUID and current insertion time.
    pub fn new(user_id: i64, chat_id: i64, content: String, sent_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            chat_id,
            content,
            sent_at,
            created_at: Utc::now(),
        }
    }
}
