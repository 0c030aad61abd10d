use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{StoredGame, UserRecord};

/// The slice of the document store this crate consumes: point reads of
/// user profiles, a time-window scan over games, and the single narrow
/// write-back for the reminder idempotency flag.
///
/// Handles are constructed once at startup by the embedder and passed
/// into each component explicitly.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read of a user profile. `Ok(None)` when the document does
    /// not exist.
    async fn user(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// All games whose start time falls inside `[from, until]` inclusive.
    async fn games_starting_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<StoredGame>, StoreError>;

    /// Conditionally set `reminderSent` on a game: the write happens only
    /// if the flag is currently false. Returns whether this call performed
    /// the false -> true transition, so an overlapping scheduler tick that
    /// loses the race observes `false` instead of silently double-marking.
    async fn mark_reminder_sent(&self, game_id: &str) -> Result<bool, StoreError>;
}
