//! Who sent a message: platform id plus the display fields.

use serde::{Deserialize, Serialize};

/// Sender identity as the platform reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Username if set, otherwise first name, otherwise a placeholder.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.first_name.as_deref())
            .unwrap_or("Unknown")
    }
}
