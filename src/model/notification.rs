use serde::{Deserialize, Serialize};

/// Coarse routing category for a notification. Unknown or absent values
/// fall back to `General`, which is delivery-allowed by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationCategory {
    Chat,
    Reminder,
    GameUpdate,
    #[default]
    General,
}

impl From<String> for NotificationCategory {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "chat" => NotificationCategory::Chat,
            "reminder" => NotificationCategory::Reminder,
            "game_update" => NotificationCategory::GameUpdate,
            _ => NotificationCategory::General,
        }
    }
}

impl From<NotificationCategory> for String {
    fn from(category: NotificationCategory) -> Self {
        category.as_str().to_string()
    }
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Chat => "chat",
            NotificationCategory::Reminder => "reminder",
            NotificationCategory::GameUpdate => "game_update",
            NotificationCategory::General => "general",
        }
    }
}

/// A notification document. Created once by the booking subsystem and read
/// exactly once by the fan-out handler; never mutated here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationRecord {
    pub user_id: String,
    pub message: String,
    /// Free-form tag, e.g. "player_joined".
    #[serde(rename = "type")]
    pub kind: String,
    pub category: NotificationCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}
