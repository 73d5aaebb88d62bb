//! AnalyticsService: the cached surface exposed to the presentation layer.
//!
//! Resolves the symbolic period once per request, fronts the engines with
//! the cache-aside layer, and joins independent sub-queries.

use std::sync::Arc;

use cache::{cache_key, CacheAside};
use chrono::Local;

use super::error::Result;
use super::period::Period;
use super::stats::StatsEngine;
use super::store::AnalyticsStore;
use super::types::{ChatOverview, UserStat, WordCloud};
use super::wordcloud::WordCloudEngine;

/// Leaderboard size for chat overviews.
pub const TOP_USERS_LIMIT: i64 = 10;
/// Ranked word count for word clouds.
pub const TOP_WORDS_LIMIT: usize = 20;

const STATS_NAMESPACE: &str = "stats";
const WORDCLOUD_NAMESPACE: &str = "wordcloud";

/// Analytics operations keyed by chat, period and query kind, with
/// cache-aside in front of the expensive aggregates.
#[derive(Clone)]
pub struct AnalyticsService {
    stats: StatsEngine,
    words: WordCloudEngine,
    cache: CacheAside,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>, cache: CacheAside) -> Self {
        Self {
            stats: StatsEngine::new(store.clone()),
            words: WordCloudEngine::new(store),
            cache,
        }
    }

    /// Leaderboard plus chat totals for the period. Cached; the two
    /// sub-queries are independent reads and run concurrently.
    pub async fn chat_overview(&self, chat_id: i64, period: Period) -> Result<ChatOverview> {
        let range = period.resolve(Local::now());
        let key = cache_key(STATS_NAMESPACE, chat_id, period.as_str());
        let stats = self.stats.clone();
        self.cache
            .get_or_compute(&key, move || async move {
                let (top_users, chat_stats) = tokio::try_join!(
                    stats.top_users(chat_id, &range, TOP_USERS_LIMIT),
                    stats.chat_stats(chat_id, &range),
                )?;
                Ok(ChatOverview {
                    top_users,
                    chat_stats,
                })
            })
            .await
    }

    /// Stats for one user in the chat. Uncached: the per-user read is cheap
    /// and personal results should reflect the latest messages.
    pub async fn user_stats(
        &self,
        user_id: i64,
        chat_id: i64,
        period: Period,
    ) -> Result<Option<UserStat>> {
        let range = period.resolve(Local::now());
        self.stats.user_stats(user_id, chat_id, &range).await
    }

    /// Ranked word frequencies for the period. Cached, except that an empty
    /// cloud is never stored: caching "no data yet" would hide newly arrived
    /// messages until the TTL ran out.
    pub async fn word_cloud(&self, chat_id: i64, period: Period) -> Result<WordCloud> {
        let range = period.resolve(Local::now());
        let key = cache_key(WORDCLOUD_NAMESPACE, chat_id, period.as_str());
        let words = self.words.clone();
        self.cache
            .get_or_compute_if(
                &key,
                move || async move { words.top_words(chat_id, &range, TOP_WORDS_LIMIT).await },
                |cloud: &WordCloud| !cloud.words.is_empty(),
            )
            .await
    }

    /// Drops every cached result for the chat, all periods and query kinds.
    /// For administrative use when underlying data changes in a way that
    /// should not wait out the TTL.
    pub async fn invalidate_chat(&self, chat_id: i64) -> u64 {
        let mut removed = 0;
        for namespace in [STATS_NAMESPACE, WORDCLOUD_NAMESPACE] {
            removed += self
                .cache
                .invalidate_prefix(&format!("{}:{}:", namespace, chat_id))
                .await;
        }
        removed
    }
}
