//! Database handle: opens the pool, creates the schema, and hands out the
//! repositories that share it.

use tracing::info;

use crate::message_repo::MessageRepository;
use crate::sqlite_pool::SqlitePoolManager;
use crate::user_repo::UserRepository;

/// Open database with its repositories. Cheap to clone; all clones share
/// one pool.
#[derive(Clone)]
pub struct Database {
    pub users: UserRepository,
    pub messages: MessageRepository,
}

impl Database {
    /// Opens (creating if missing) the database at `database_url` and
    /// ensures the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let users = UserRepository::new(pool_manager.clone());
        let messages = MessageRepository::new(pool_manager);

        users.init().await?;
        messages.init().await?;
        info!(database_url, "Database schema ready");

        Ok(Self { users, messages })
    }
}
