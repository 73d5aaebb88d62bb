//! Message repository: persistence and point queries for messages.
//!
//! The range-filtered aggregate queries live in the [`AnalyticsStore`]
//! implementation (`analytics_store.rs`); this module covers ingestion and
//! the recent-history lookup used by user analysis.
//!
//! [`AnalyticsStore`]: analytics::AnalyticsStore

use tracing::info;

use crate::models::MessageRecord;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub(crate) fn new(pool_manager: SqlitePoolManager) -> Self {
        Self { pool_manager }
    }

    pub(crate) fn pool(&self) -> &sqlx::SqlitePool {
        self.pool_manager.pool()
    }

    pub(crate) async fn init(&self) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                chat_id INTEGER NOT NULL,
                content TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_chat_sent ON messages(chat_id, sent_at);
            CREATE INDEX IF NOT EXISTS idx_messages_user_sent ON messages(user_id, sent_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn save(&self, message: &MessageRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, chat_id, content, sent_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(message.user_id)
        .bind(message.chat_id)
        .bind(&message.content)
        .bind(message.sent_at)
        .bind(message.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        info!(
            message_id = %message.id,
            user_id = message.user_id,
            chat_id = message.chat_id,
            "Saved message"
        );
        Ok(())
    }

    /// The user's most recent messages across all chats, newest first.
    pub async fn recent_by_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<MessageRecord>, sqlx::Error> {
        let messages = sqlx::query_as::<_, MessageRecord>(
            "SELECT * FROM messages WHERE user_id = ? ORDER BY sent_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!(user_id, count = messages.len(), "Retrieved recent messages");
        Ok(messages)
    }
}
