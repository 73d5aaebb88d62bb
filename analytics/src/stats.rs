//! Statistics engine: leaderboards, per-user stats, chat totals.

use std::sync::Arc;

use tracing::debug;

use super::error::Result;
use super::period::TimeRange;
use super::store::AnalyticsStore;
use super::types::{ChatStat, TopUserStat, UserStat};

/// Executes the aggregate statistics queries against an injected store.
/// Holds no state of its own; every call is an independent read.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn AnalyticsStore>,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    /// Top `limit` most active users in the chat within the interval.
    /// Empty when no messages match.
    pub async fn top_users(
        &self,
        chat_id: i64,
        range: &TimeRange,
        limit: i64,
    ) -> Result<Vec<TopUserStat>> {
        let users = self.store.top_users(chat_id, range, limit).await?;
        debug!(chat_id, rows = users.len(), "top users computed");
        Ok(users)
    }

    /// Stats for one user in one chat within the interval. `None` when the
    /// user wrote nothing there: a silent user has no stats, not zero-valued ones.
    pub async fn user_stats(
        &self,
        user_id: i64,
        chat_id: i64,
        range: &TimeRange,
    ) -> Result<Option<UserStat>> {
        let agg = self.store.user_aggregate(user_id, chat_id, range).await?;
        if agg.message_count == 0 {
            return Ok(None);
        }
        let (first_message, last_message) = match (agg.first_message, agg.last_message) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(None),
        };
        Ok(Some(UserStat {
            message_count: agg.message_count,
            avg_message_length: agg.avg_message_length.unwrap_or(0.0),
            first_message,
            last_message,
        }))
    }

    /// Chat-wide totals within the interval, with the interval bounds echoed
    /// back. Always a record; zero-valued when the chat was silent.
    pub async fn chat_stats(&self, chat_id: i64, range: &TimeRange) -> Result<ChatStat> {
        let agg = self.store.chat_aggregate(chat_id, range).await?;
        Ok(ChatStat {
            total_messages: agg.total_messages,
            unique_users: agg.unique_users,
            period_start: range.start,
            period_end: range.end,
        })
    }
}
