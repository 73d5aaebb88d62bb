//! Bot trait: the outbound message surface handlers talk to.
//! Production uses the teloxide adapter; tests substitute a recording impl.

use async_trait::async_trait;

use super::error::Result;
use super::types::{Chat, Message};

/// Sends messages to a chat, independent of the transport.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Answers in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
