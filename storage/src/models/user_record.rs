//! User record model for persistence.
//!
//! Maps to the `users` table, keyed by the Telegram id. Display fields are
//! refreshed on every observation; the row itself is never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row from the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Telegram user id (primary key).
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(
        telegram_id: i64,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            telegram_id,
            username,
            first_name,
            last_name,
            created_at: Utc::now(),
        }
    }
}
