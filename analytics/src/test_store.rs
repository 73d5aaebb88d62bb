//! In-memory [`AnalyticsStore`] used by engine and service tests, so no
//! database is needed to exercise the analytics logic.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::Result;
use super::period::TimeRange;
use super::store::{AnalyticsStore, ChatAggregate, UserAggregate};
use super::types::TopUserStat;

pub struct FixtureMessage {
    pub user_id: i64,
    pub chat_id: i64,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

pub fn msg(user_id: i64, chat_id: i64, text: &str, sent_at: DateTime<Utc>) -> FixtureMessage {
    FixtureMessage {
        user_id,
        chat_id,
        text: text.to_string(),
        sent_at,
    }
}

/// Message-backed store computing the same aggregates as the SQL
/// implementation. Counts every trait call so tests can assert how often the
/// cache layer actually reached the store.
pub struct FixtureStore {
    messages: Vec<FixtureMessage>,
    calls: AtomicUsize,
}

impl FixtureStore {
    pub fn new(messages: Vec<FixtureMessage>) -> Self {
        Self {
            messages,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn in_range(&self, chat_id: i64, range: &TimeRange) -> Vec<&FixtureMessage> {
        self.messages
            .iter()
            .filter(|m| m.chat_id == chat_id && range.contains(m.sent_at))
            .collect()
    }
}

#[async_trait]
impl AnalyticsStore for FixtureStore {
    async fn top_users(
        &self,
        chat_id: i64,
        range: &TimeRange,
        limit: i64,
    ) -> Result<Vec<TopUserStat>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut counts: BTreeMap<i64, i64> = BTreeMap::new();
        for m in self.in_range(chat_id, range) {
            *counts.entry(m.user_id).or_insert(0) += 1;
        }
        let mut rows: Vec<TopUserStat> = counts
            .into_iter()
            .map(|(user_id, message_count)| TopUserStat {
                user_id,
                username: Some(format!("user{}", user_id)),
                first_name: None,
                last_name: None,
                message_count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.message_count
                .cmp(&a.message_count)
                .then(a.user_id.cmp(&b.user_id))
        });
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn user_aggregate(
        &self,
        user_id: i64,
        chat_id: i64,
        range: &TimeRange,
    ) -> Result<UserAggregate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mine: Vec<&FixtureMessage> = self
            .in_range(chat_id, range)
            .into_iter()
            .filter(|m| m.user_id == user_id)
            .collect();
        if mine.is_empty() {
            return Ok(UserAggregate {
                message_count: 0,
                avg_message_length: None,
                first_message: None,
                last_message: None,
            });
        }
        let total_chars: usize = mine.iter().map(|m| m.text.chars().count()).sum();
        Ok(UserAggregate {
            message_count: mine.len() as i64,
            avg_message_length: Some(total_chars as f64 / mine.len() as f64),
            first_message: mine.iter().map(|m| m.sent_at).min(),
            last_message: mine.iter().map(|m| m.sent_at).max(),
        })
    }

    async fn chat_aggregate(&self, chat_id: i64, range: &TimeRange) -> Result<ChatAggregate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let matching = self.in_range(chat_id, range);
        let unique: HashSet<i64> = matching.iter().map(|m| m.user_id).collect();
        Ok(ChatAggregate {
            total_messages: matching.len() as i64,
            unique_users: unique.len() as i64,
        })
    }

    async fn message_texts(&self, chat_id: i64, range: &TimeRange) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .in_range(chat_id, range)
            .into_iter()
            .map(|m| m.text.clone())
            .collect())
    }
}
