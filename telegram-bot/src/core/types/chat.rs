//! Where a message was posted.

use serde::{Deserialize, Serialize};

/// The chat a message belongs to (group, supergroup, private or channel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// True for group and supergroup chats; analytics commands and message
    /// collection only apply there.
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }
}
