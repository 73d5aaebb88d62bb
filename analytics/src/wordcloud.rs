//! Word-frequency engine: tokenize message texts, drop noise, rank by count.
//!
//! Filtering happens entirely here rather than in the store, so stop-word and
//! limit policy can change without touching schema or queries.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use super::error::Result;
use super::period::TimeRange;
use super::store::AnalyticsStore;
use super::types::{WordCloud, WordCount};

/// Function words excluded from frequency ranking (Russian and English).
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "и", "в", "не", "на", "я", "что", "с", "а", "как", "это", "по", "но", "для", "за", "к", "у",
    "о", "из", "от", "то", "же", "бы", "ну", "да", "нет", "все", "всё", "он", "она", "они", "мы",
    "вы", "ты", "так", "вот", "там", "тут", "еще", "ещё", "когда", "где", "кто", "the", "a", "an",
    "and", "or", "but", "in", "on", "at", "to", "for", "is", "are", "was", "were", "be", "being",
    "been", "it", "i", "you", "he", "she", "we", "they", "of", "with", "that", "this", "my",
    "your", "not", "so", "if", "me", "just", "do", "im",
];

/// Characters besides whitespace that terminate a token, including
/// typographic quotes and dashes.
pub const BOUNDARY_CHARS: &[char] = &[
    ',', '.', ';', ':', '!', '?', '(', ')', '"', '\'', '{', '}', '[', ']', '<', '>', '«', '»',
    '—', '–',
];

/// Tokens at or below this many characters are dropped.
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenization and filtering policy: boundary characters, stop words,
/// minimum token length. Construct with [`Default`] for the standard policy
/// or [`WordFilter::new`] to substitute another one in tests.
#[derive(Clone)]
pub struct WordFilter {
    stop_words: HashSet<String>,
    boundary_chars: Vec<char>,
    min_chars: usize,
}

impl WordFilter {
    pub fn new(
        stop_words: impl IntoIterator<Item = String>,
        boundary_chars: Vec<char>,
        min_chars: usize,
    ) -> Self {
        Self {
            stop_words: stop_words.into_iter().collect(),
            boundary_chars,
            min_chars,
        }
    }

    /// True if `c` ends a token.
    fn is_boundary(&self, c: char) -> bool {
        c.is_whitespace() || self.boundary_chars.contains(&c)
    }

    /// True if the (already lowercased) token survives filtering.
    fn keeps(&self, token: &str) -> bool {
        token.chars().count() > self.min_chars
            && !self.stop_words.contains(token)
            && !token.starts_with('@')
            && !token.starts_with('#')
            && !token.starts_with("http")
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()),
            BOUNDARY_CHARS.to_vec(),
            MIN_TOKEN_CHARS,
        )
    }
}

/// Computes ranked word frequencies for a chat and interval.
#[derive(Clone)]
pub struct WordCloudEngine {
    store: Arc<dyn AnalyticsStore>,
    filter: WordFilter,
}

impl WordCloudEngine {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self::with_filter(store, WordFilter::default())
    }

    pub fn with_filter(store: Arc<dyn AnalyticsStore>, filter: WordFilter) -> Self {
        Self { store, filter }
    }

    /// Top `limit` words by frequency within the chat and interval, plus the
    /// number of messages scanned. Zero messages yield an empty cloud, not
    /// an error. Ranking is descending by count; equal counts keep the order
    /// in which the words were first encountered.
    pub async fn top_words(
        &self,
        chat_id: i64,
        range: &TimeRange,
        limit: usize,
    ) -> Result<WordCloud> {
        let texts = self.store.message_texts(chat_id, range).await?;
        if texts.is_empty() {
            return Ok(WordCloud {
                words: Vec::new(),
                total_messages: 0,
            });
        }
        let total_messages = texts.len() as i64;

        let mut frequencies: IndexMap<String, i64> = IndexMap::new();
        for text in &texts {
            let lowered = text.to_lowercase();
            for token in lowered.split(|c: char| self.filter.is_boundary(c)) {
                if self.filter.keeps(token) {
                    *frequencies.entry(token.to_string()).or_insert(0) += 1;
                }
            }
        }

        let mut words: Vec<WordCount> = frequencies
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();
        // Stable sort: ties stay in first-encountered order.
        words.sort_by(|a, b| b.count.cmp(&a.count));
        words.truncate(limit);

        debug!(
            chat_id,
            total_messages,
            distinct_words = words.len(),
            "word cloud computed"
        );
        Ok(WordCloud {
            words,
            total_messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::test_store::{msg, FixtureStore};
    use crate::Period;

    const CHAT: i64 = 42;

    async fn cloud_for(texts: &[&str]) -> WordCloud {
        cloud_for_limited(texts, 20).await
    }

    async fn cloud_for_limited(texts: &[&str], limit: usize) -> WordCloud {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let sent = Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap();
        let messages = texts.iter().map(|t| msg(1, CHAT, t, sent)).collect();
        let engine = WordCloudEngine::new(Arc::new(FixtureStore::new(messages)));
        let range = Period::Today.resolve(now);
        engine
            .top_words(CHAT, &range, limit)
            .await
            .expect("fixture store never fails")
    }

    fn counts(cloud: &WordCloud) -> Vec<(&str, i64)> {
        cloud
            .words
            .iter()
            .map(|w| (w.word.as_str(), w.count))
            .collect()
    }

    #[tokio::test]
    async fn ranks_words_by_descending_frequency() {
        let cloud = cloud_for(&["test test test", "hello world", "hello again"]).await;

        assert_eq!(cloud.total_messages, 3);
        assert_eq!(counts(&cloud)[0], ("test", 3));
        assert_eq!(counts(&cloud)[1], ("hello", 2));
        let tail: Vec<i64> = cloud.words[2..].iter().map(|w| w.count).collect();
        assert_eq!(tail, vec![1, 1]);
        assert!(cloud
            .words
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
    }

    #[tokio::test]
    async fn equal_counts_keep_first_encountered_order() {
        let cloud = cloud_for(&["zebra apple", "zebra apple mango"]).await;

        // zebra and apple tie on two; they keep the order they first
        // appeared in, never alphabetical.
        assert_eq!(
            counts(&cloud),
            vec![("zebra", 2), ("apple", 2), ("mango", 1)]
        );
    }

    #[tokio::test]
    async fn drops_stop_words_short_tokens_mentions_tags_and_links() {
        let cloud = cloud_for(&[
            "the and for with дом дом",
            "ok no he мы",
            "@someone @someone #topic httplink httpswwwlink ever",
        ])
        .await;

        assert_eq!(cloud.total_messages, 3);
        let words: Vec<&str> = cloud.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["дом", "ever"]);
    }

    #[tokio::test]
    async fn splits_on_punctuation_and_typographic_marks() {
        let cloud = cloud_for(&["wait—what?! «quote» (brackets) [more] end"]).await;

        let words: Vec<&str> = cloud.words.iter().map(|w| w.word.as_str()).collect();
        assert!(words.contains(&"wait"));
        assert!(words.contains(&"what"));
        assert!(words.contains(&"quote"));
        assert!(words.contains(&"brackets"));
        assert!(!words.iter().any(|w| w.contains('«') || w.contains('—')));
    }

    #[tokio::test]
    async fn lowercases_before_counting() {
        let cloud = cloud_for(&["Rust RUST rust"]).await;
        assert_eq!(counts(&cloud), vec![("rust", 3)]);
    }

    #[tokio::test]
    async fn truncates_to_limit() {
        let cloud = cloud_for_limited(&["one1 two2 three3 four4 five5 six6"], 5).await;
        assert_eq!(cloud.words.len(), 5);
    }

    #[tokio::test]
    async fn substituted_filter_changes_the_policy() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        let sent = Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap();
        let store = Arc::new(FixtureStore::new(vec![msg(1, CHAT, "rust rust tokio", sent)]));

        let filter = WordFilter::new(["rust".to_string()], BOUNDARY_CHARS.to_vec(), 2);
        let engine = WordCloudEngine::with_filter(store, filter);
        let cloud = engine
            .top_words(CHAT, &Period::Today.resolve(now), 20)
            .await
            .expect("fixture store never fails");

        assert_eq!(counts(&cloud), vec![("tokio", 1)]);
    }

    #[tokio::test]
    async fn no_messages_yield_empty_cloud_with_zero_total() {
        let cloud = cloud_for(&[]).await;
        assert!(cloud.words.is_empty());
        assert_eq!(cloud.total_messages, 0);
    }

    #[tokio::test]
    async fn all_tokens_filtered_still_reports_scanned_messages() {
        // Every token is two characters or shorter, so nothing survives,
        // but both messages were scanned.
        let cloud = cloud_for(&["a b c", "a a b"]).await;
        assert!(cloud.words.is_empty());
        assert_eq!(cloud.total_messages, 2);
    }
}
