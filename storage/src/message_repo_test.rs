//! Unit tests for UserRepository and MessageRepository.
//!
//! Covers upsert refresh, point lookups, save and recent-by-user.

use chrono::{Duration, TimeZone, Utc};

use crate::db::Database;
use crate::models::{MessageRecord, UserRecord};

async fn open_db() -> Database {
    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

#[tokio::test]
async fn upsert_inserts_then_refreshes_display_fields() {
    let db = open_db().await;

    let user = UserRecord::new(
        123,
        Some("old_handle".to_string()),
        Some("Old".to_string()),
        None,
    );
    db.users.upsert(&user).await.expect("Failed to upsert");

    let renamed = UserRecord::new(
        123,
        Some("new_handle".to_string()),
        Some("New".to_string()),
        Some("Name".to_string()),
    );
    db.users.upsert(&renamed).await.expect("Failed to upsert");

    let found = db
        .users
        .find_by_telegram_id(123)
        .await
        .expect("Failed to query")
        .expect("User should exist");
    assert_eq!(found.username.as_deref(), Some("new_handle"));
    assert_eq!(found.first_name.as_deref(), Some("New"));
    assert_eq!(found.last_name.as_deref(), Some("Name"));
    // The original first-seen time survives the refresh.
    assert_eq!(found.created_at, user.created_at);
}

#[tokio::test]
async fn find_by_telegram_id_not_found() {
    let db = open_db().await;

    let found = db
        .users
        .find_by_telegram_id(999)
        .await
        .expect("Failed to query");
    assert!(found.is_none());
}

#[tokio::test]
async fn find_by_username_matches_exactly() {
    let db = open_db().await;

    let user = UserRecord::new(7, Some("alice".to_string()), None, None);
    db.users.upsert(&user).await.expect("Failed to upsert");

    let found = db
        .users
        .find_by_username("alice")
        .await
        .expect("Failed to query");
    assert_eq!(found.expect("User should exist").telegram_id, 7);

    let missing = db
        .users
        .find_by_username("bob")
        .await
        .expect("Failed to query");
    assert!(missing.is_none());
}

#[tokio::test]
async fn save_and_fetch_recent_by_user() {
    let db = open_db().await;
    let base = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();

    for i in 0..15 {
        let message = MessageRecord::new(
            100,
            -500,
            format!("message {}", i),
            base + Duration::minutes(i),
        );
        db.messages.save(&message).await.expect("Failed to save");
    }
    // Another user's message must not show up.
    let other = MessageRecord::new(200, -500, "not mine".to_string(), base);
    db.messages.save(&other).await.expect("Failed to save");

    let recent = db
        .messages
        .recent_by_user(100, 10)
        .await
        .expect("Failed to query");

    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].content, "message 14");
    assert!(recent.windows(2).all(|w| w[0].sent_at >= w[1].sent_at));
    assert!(recent.iter().all(|m| m.user_id == 100));
}

#[tokio::test]
async fn recent_by_user_empty_when_user_unknown() {
    let db = open_db().await;

    let recent = db
        .messages
        .recent_by_user(999, 10)
        .await
        .expect("Failed to query");
    assert!(recent.is_empty());
}

#[tokio::test]
async fn file_backed_database_survives_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("stats.db").display());

    {
        let db = Database::connect(&url).await.expect("Failed to open database");
        let message = MessageRecord::new(
            1,
            -500,
            "persisted".to_string(),
            Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
        );
        db.messages.save(&message).await.expect("Failed to save");
    }

    let reopened = Database::connect(&url).await.expect("Failed to reopen database");
    let recent = reopened
        .messages
        .recent_by_user(1, 10)
        .await
        .expect("Failed to query");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].content, "persisted");
}
