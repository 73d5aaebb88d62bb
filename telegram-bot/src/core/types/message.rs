//! The transport-agnostic message the handler chain operates on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Whether the message came from a user or was sent by this bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// One chat message with its sender, chat and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    /// "text" for text messages; anything else is not persisted.
    pub message_type: String,
    pub direction: MessageDirection,
    /// When the message occurred on the platform.
    pub sent_at: DateTime<Utc>,
    /// When this process first saw it.
    pub created_at: DateTime<Utc>,
    /// Author of the replied-to message; used to resolve `/analyze` targets.
    pub reply_to_user: Option<User>,
}
