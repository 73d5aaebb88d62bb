//! Handler that persists incoming group messages to storage in before().

use async_trait::async_trait;
use tracing::{error, info, instrument};

use storage::{Database, MessageRecord, UserRecord};

use crate::core::{BotError, Handler, Message, Result};

/// Upserts the sender and saves each incoming group text message; always
/// continues the chain. Commands and private chats are not recorded.
#[derive(Clone)]
pub struct PersistenceHandler {
    db: Database,
}

impl PersistenceHandler {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn should_persist(message: &Message) -> bool {
        message.chat.is_group()
            && message.message_type == "text"
            && !message.content.is_empty()
            && !message.content.starts_with('/')
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !Self::should_persist(message) {
            return Ok(true);
        }

        let user = UserRecord::new(
            message.user.id,
            message.user.username.clone(),
            message.user.first_name.clone(),
            message.user.last_name.clone(),
        );
        self.db.users.upsert(&user).await.map_err(|e| {
            error!(error = %e, user_id = message.user.id, "Failed to upsert user");
            BotError::Database(e.to_string())
        })?;

        let record = MessageRecord::new(
            message.user.id,
            message.chat.id,
            message.content.clone(),
            message.sent_at,
        );
        self.db.messages.save(&record).await.map_err(|e| {
            error!(error = %e, user_id = message.user.id, "Failed to save message");
            BotError::Database(e.to_string())
        })?;

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Message persisted"
        );
        Ok(true)
    }
}
