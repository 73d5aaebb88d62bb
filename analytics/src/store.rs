//! AnalyticsStore trait: the read-only aggregate queries this crate consumes
//! from the persistence layer. The storage crate provides the SQLite
//! implementation; tests substitute an in-memory one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::Result;
use super::period::TimeRange;
use super::types::TopUserStat;

/// Raw single-user aggregate row. `message_count` of zero means the user
/// never wrote in the interval; the other fields are then meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAggregate {
    pub message_count: i64,
    pub avg_message_length: Option<f64>,
    pub first_message: Option<DateTime<Utc>>,
    pub last_message: Option<DateTime<Utc>>,
}

/// Raw chat-wide aggregate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatAggregate {
    pub total_messages: i64,
    pub unique_users: i64,
}

/// Range-filtered aggregate queries over persisted messages. All intervals
/// are half-open: `start <= t < end`.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Messages grouped by user within the chat and interval, counted,
    /// ordered descending by count (platform id ascending on ties),
    /// truncated to `limit`.
    async fn top_users(
        &self,
        chat_id: i64,
        range: &TimeRange,
        limit: i64,
    ) -> Result<Vec<TopUserStat>>;

    /// Count, mean text length and first/last occurrence for one user in one
    /// chat within the interval.
    async fn user_aggregate(
        &self,
        user_id: i64,
        chat_id: i64,
        range: &TimeRange,
    ) -> Result<UserAggregate>;

    /// Total message count and distinct contributing users within the interval.
    async fn chat_aggregate(&self, chat_id: i64, range: &TimeRange) -> Result<ChatAggregate>;

    /// All message texts for the chat and interval, unfiltered; token
    /// filtering happens in the word-frequency engine, not the store.
    async fn message_texts(&self, chat_id: i64, range: &TimeRange) -> Result<Vec<String>>;
}
