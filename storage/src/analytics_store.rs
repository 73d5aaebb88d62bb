//! AnalyticsStore implementation: the range-filtered aggregate SQL behind
//! the analytics engines. Row structs here are boundary adapters; engine
//! logic never sees sqlx types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use analytics::{
    AnalyticsError, AnalyticsStore, ChatAggregate, TimeRange, TopUserStat, UserAggregate,
};

use crate::message_repo::MessageRepository;

fn store_error(e: sqlx::Error) -> AnalyticsError {
    AnalyticsError::StoreUnavailable(e.to_string())
}

#[derive(sqlx::FromRow)]
struct TopUserRow {
    telegram_id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    message_count: i64,
}

impl From<TopUserRow> for TopUserStat {
    fn from(row: TopUserRow) -> Self {
        Self {
            user_id: row.telegram_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            message_count: row.message_count,
        }
    }
}

#[async_trait]
impl AnalyticsStore for MessageRepository {
    async fn top_users(
        &self,
        chat_id: i64,
        range: &TimeRange,
        limit: i64,
    ) -> analytics::Result<Vec<TopUserStat>> {
        let rows: Vec<TopUserRow> = sqlx::query_as(
            r#"
            SELECT
                u.telegram_id,
                u.username,
                u.first_name,
                u.last_name,
                COUNT(m.id) AS message_count
            FROM users u
            JOIN messages m ON m.user_id = u.telegram_id
            WHERE m.chat_id = ? AND m.sent_at >= ? AND m.sent_at < ?
            GROUP BY u.telegram_id, u.username, u.first_name, u.last_name
            ORDER BY message_count DESC, u.telegram_id ASC
            LIMIT ?
            "#,
        )
        .bind(chat_id)
        .bind(range.start)
        .bind(range.end)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn user_aggregate(
        &self,
        user_id: i64,
        chat_id: i64,
        range: &TimeRange,
    ) -> analytics::Result<UserAggregate> {
        let (message_count, avg_message_length, first_message, last_message): (
            i64,
            Option<f64>,
            Option<DateTime<Utc>>,
            Option<DateTime<Utc>>,
        ) = sqlx::query_as(
            r#"
            SELECT
                COUNT(id),
                AVG(LENGTH(content)),
                MIN(sent_at),
                MAX(sent_at)
            FROM messages
            WHERE user_id = ? AND chat_id = ? AND sent_at >= ? AND sent_at < ?
            "#,
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(self.pool())
        .await
        .map_err(store_error)?;

        Ok(UserAggregate {
            message_count,
            avg_message_length,
            first_message,
            last_message,
        })
    }

    async fn chat_aggregate(
        &self,
        chat_id: i64,
        range: &TimeRange,
    ) -> analytics::Result<ChatAggregate> {
        let (total_messages, unique_users): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(id), COUNT(DISTINCT user_id)
            FROM messages
            WHERE chat_id = ? AND sent_at >= ? AND sent_at < ?
            "#,
        )
        .bind(chat_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(self.pool())
        .await
        .map_err(store_error)?;

        Ok(ChatAggregate {
            total_messages,
            unique_users,
        })
    }

    async fn message_texts(
        &self,
        chat_id: i64,
        range: &TimeRange,
    ) -> analytics::Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT content FROM messages WHERE chat_id = ? AND sent_at >= ? AND sent_at < ?",
        )
        .bind(chat_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool())
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(|(content,)| content).collect())
    }
}
