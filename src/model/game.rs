use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A game document as stored, with every field defaulted so partially
/// populated documents deserialize cleanly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameRecord {
    pub title: String,
    pub max_players: u32,
    /// Confirmed players. Order irrelevant.
    pub participants: Vec<String>,
    /// Users waiting for a spot, in join order. All of them are notified
    /// identically when a spot opens; first to act wins.
    pub waitlist: Vec<String>,
    /// Scheduled start time.
    pub date: Option<DateTime<Utc>>,
    pub is_cancelled: bool,
    /// One-way idempotency marker for the start reminder. Transitions
    /// false -> true exactly once, never reset.
    pub reminder_sent: bool,
}

impl GameRecord {
    /// Display title, falling back when the document has none.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { "Your game" } else { &self.title }
    }
}

/// A game record paired with its document identifier.
#[derive(Clone, Debug)]
pub struct StoredGame {
    pub id: String,
    pub game: GameRecord,
}
