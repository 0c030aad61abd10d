use serde::{Deserialize, Serialize};

/// A user profile document, read-only from this crate's perspective.
/// Preference flags are tri-state in the store; an absent flag means the
/// user never touched the setting and delivery stays allowed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    /// Registered device tokens. May be empty, may contain stale entries.
    pub fcm_tokens: Vec<String>,
    pub notify_game_updates: Option<bool>,
    pub notify_chat_messages: Option<bool>,
    pub notify_reminders: Option<bool>,
}

impl UserRecord {
    pub fn wants_game_updates(&self) -> bool {
        self.notify_game_updates.unwrap_or(true)
    }

    pub fn wants_chat_messages(&self) -> bool {
        self.notify_chat_messages.unwrap_or(true)
    }

    pub fn wants_reminders(&self) -> bool {
        self.notify_reminders.unwrap_or(true)
    }
}
