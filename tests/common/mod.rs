#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pickup_push::error::{GatewayError, StoreError};
use pickup_push::gateway::{PushGateway, PushMessage, SendReceipt};
use pickup_push::model::{GameRecord, StoredGame, UserRecord};
use pickup_push::store::DocumentStore;

/// In-memory stand-in for the document store.
#[derive(Default)]
pub struct MemoryStore {
    users: HashMap<String, UserRecord>,
    games: Mutex<HashMap<String, GameRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, id: &str, user: UserRecord) -> Self {
        self.users.insert(id.to_string(), user);
        self
    }

    pub fn with_game(self, id: &str, game: GameRecord) -> Self {
        self.games.lock().unwrap().insert(id.to_string(), game);
        self
    }

    pub fn reminder_sent(&self, id: &str) -> bool {
        self.games
            .lock()
            .unwrap()
            .get(id)
            .map(|g| g.reminder_sent)
            .unwrap_or(false)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(user_id).cloned())
    }

    async fn games_starting_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<StoredGame>, StoreError> {
        let games = self.games.lock().unwrap();
        Ok(games
            .iter()
            .filter_map(|(id, game)| {
                let date = game.date?;
                (date >= from && date <= until)
                    .then(|| StoredGame { id: id.clone(), game: game.clone() })
            })
            .collect())
    }

    async fn mark_reminder_sent(&self, game_id: &str) -> Result<bool, StoreError> {
        let mut games = self.games.lock().unwrap();
        let game = games
            .get_mut(game_id)
            .ok_or_else(|| StoreError::Missing { collection: "games", id: game_id.to_string() })?;
        if game.reminder_sent {
            Ok(false)
        } else {
            game.reminder_sent = true;
            Ok(true)
        }
    }
}

/// Gateway double that records every accepted batch, or fails the whole
/// batch at the transport level when constructed with `failing()`.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<PushMessage>>,
    fail: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn messages(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    async fn send(&self, message: &PushMessage) -> Result<SendReceipt, GatewayError> {
        if self.fail {
            return Err(GatewayError::Transport("gateway offline".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(SendReceipt { success: message.tokens.len() as u32, failure: 0 })
    }
}

pub fn user_with_tokens(tokens: &[&str]) -> UserRecord {
    UserRecord {
        fcm_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        ..UserRecord::default()
    }
}

pub fn game(title: &str, max_players: u32, participants: &[&str], waitlist: &[&str]) -> GameRecord {
    GameRecord {
        title: title.to_string(),
        max_players,
        participants: participants.iter().map(|p| p.to_string()).collect(),
        waitlist: waitlist.iter().map(|w| w.to_string()).collect(),
        ..GameRecord::default()
    }
}
