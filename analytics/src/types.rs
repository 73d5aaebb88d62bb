//! Derived, read-only analytics records returned to the presentation layer.
//!
//! All types serialize to JSON so the cache layer can round-trip them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One leaderboard row: a user and their message count within the period.
/// Lists are ranked descending by count, platform id as the tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUserStat {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub message_count: i64,
}

/// Per-user statistics for one chat and period. A user with zero messages
/// has no stats at all (`None`), not a zero-filled record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStat {
    pub message_count: i64,
    /// Arithmetic mean of message text length, in characters.
    pub avg_message_length: f64,
    pub first_message: DateTime<Utc>,
    pub last_message: DateTime<Utc>,
}

/// Chat-wide totals for a period; zero-valued is a valid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStat {
    pub total_messages: i64,
    pub unique_users: i64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

/// A normalized token and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: i64,
}

/// Ranked word frequencies plus the number of messages they were drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloud {
    pub words: Vec<WordCount>,
    /// Messages fetched for the period, not the token count.
    pub total_messages: i64,
}

/// Leaderboard and chat totals computed together for one chat and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOverview {
    pub top_users: Vec<TopUserStat>,
    pub chat_stats: ChatStat,
}
