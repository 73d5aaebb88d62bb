//! Analytics crate: period bucketing, statistics queries, word-frequency
//! extraction, and the cached service facade over both engines.
//!
//! ## Modules
//!
//! - [`error`] – AnalyticsError (InvalidArgument, StoreUnavailable)
//! - [`period`] – Period and TimeRange (symbolic tag → half-open interval)
//! - [`types`] – TopUserStat, UserStat, ChatStat, WordCount, WordCloud, ChatOverview
//! - [`store`] – AnalyticsStore trait (implemented by the storage crate)
//! - [`stats`] – StatsEngine (top users, per-user stats, chat totals)
//! - [`wordcloud`] – WordFilter and WordCloudEngine (tokenize, filter, rank)
//! - [`service`] – AnalyticsService (cache-aside front for the engines)

mod error;
mod period;
mod service;
mod stats;
mod store;
mod types;
mod wordcloud;

#[cfg(test)]
mod test_store;

pub use error::{AnalyticsError, Result};
pub use period::{Period, TimeRange};
pub use service::{AnalyticsService, TOP_USERS_LIMIT, TOP_WORDS_LIMIT};
pub use stats::StatsEngine;
pub use store::{AnalyticsStore, ChatAggregate, UserAggregate};
pub use types::{ChatOverview, ChatStat, TopUserStat, UserStat, WordCloud, WordCount};
pub use wordcloud::{WordCloudEngine, WordFilter, BOUNDARY_CHARS, DEFAULT_STOP_WORDS};
