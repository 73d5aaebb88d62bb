//! Storage crate: SQLite persistence for users and messages.
//!
//! ## Modules
//!
//! - [`models`] – MessageRecord, UserRecord
//! - [`db`] – Database (pool + schema + repositories)
//! - [`user_repo`] – UserRepository (upsert, point lookups)
//! - [`message_repo`] – MessageRepository (insert, recent-by-user)
//! - [`analytics_store`] – AnalyticsStore implementation (aggregate SQL)
//! - [`sqlite_pool`] – SqlitePoolManager

mod analytics_store;
mod db;
mod message_repo;
mod models;
mod sqlite_pool;
mod user_repo;

#[cfg(test)]
mod message_repo_test;

pub use db::Database;
pub use message_repo::MessageRepository;
pub use models::{MessageRecord, UserRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::UserRepository;
