//! Conversions from teloxide types into the core model.

use crate::core::{Chat, Message, MessageDirection, User};

impl From<&teloxide::types::User> for User {
    fn from(user: &teloxide::types::User) -> Self {
        User {
            id: user.id.0 as i64,
            username: user.username.clone(),
            first_name: Some(user.first_name.clone()),
            last_name: user.last_name.clone(),
        }
    }
}

/// Telegram's chat flavor collapsed to the strings the core model carries.
fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    }
}

impl From<&teloxide::types::Message> for Message {
    fn from(msg: &teloxide::types::Message) -> Self {
        // Channel posts and service messages have no sender; id 0 marks them
        // and they never pass the persistence filter.
        let user = msg.from.as_ref().map(User::from).unwrap_or(User {
            id: 0,
            username: None,
            first_name: None,
            last_name: None,
        });

        Message {
            id: msg.id.to_string(),
            user,
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: chat_type(&msg.chat).to_string(),
            },
            content: msg.text().unwrap_or("").to_string(),
            message_type: if msg.text().is_some() { "text" } else { "other" }.to_string(),
            direction: MessageDirection::Incoming,
            sent_at: msg.date,
            created_at: chrono::Utc::now(),
            reply_to_user: msg
                .reply_to_message()
                .and_then(|m| m.from.as_ref())
                .map(User::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram_user(id: u64, username: Option<&str>, first_name: &str) -> teloxide::types::User {
        teloxide::types::User {
            id: teloxide::types::UserId(id),
            is_bot: false,
            first_name: first_name.to_string(),
            last_name: None,
            username: username.map(String::from),
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn user_conversion_maps_identity_fields() {
        let user = telegram_user(123, Some("testuser"), "Test");

        let core_user = User::from(&user);

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username.as_deref(), Some("testuser"));
        assert_eq!(core_user.first_name.as_deref(), Some("Test"));
        assert_eq!(core_user.last_name, None);
    }

    #[test]
    fn user_conversion_without_username_falls_back_to_first_name() {
        let user = telegram_user(456, None, "Minimal");

        let core_user = User::from(&user);

        assert_eq!(core_user.id, 456);
        assert_eq!(core_user.username, None);
        assert_eq!(core_user.display_name(), "Minimal");
    }
}
