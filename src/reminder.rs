use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::dispatch::{dispatch, resolve_tokens, DispatchOutcome};
use crate::gateway::{PushGateway, PushMessage};
use crate::model::StoredGame;
use crate::store::DocumentStore;

/// Cadence and window shape for the reminder scan. The look-back margin
/// absorbs scheduler jitter and skipped ticks; the look-ahead margin is
/// the "about an hour before start" lead time.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick_minutes: u64,
    pub look_back_minutes: i64,
    pub look_ahead_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { tick_minutes: 5, look_back_minutes: 10, look_ahead_minutes: 60 }
    }
}

/// Periodic scan that sends one start reminder per game. The persisted
/// `reminderSent` flag is the authoritative dedup mechanism; the polling
/// window only bounds how much work one tick looks at.
pub struct ReminderScheduler<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
    config: SchedulerConfig,
}

impl<S, G> ReminderScheduler<S, G>
where
    S: DocumentStore,
    G: PushGateway,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, config: SchedulerConfig) -> Self {
        Self { store, gateway, config }
    }

    /// Drive `run_once` forever on the configured cadence.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(StdDuration::from_secs(self.config.tick_minutes * 60));
        loop {
            interval.tick().await;
            self.run_once(Utc::now()).await;
        }
    }

    /// One scheduler tick. Takes `now` explicitly so window behavior is
    /// testable at fixed instants.
    #[instrument(skip(self), fields(now = %now))]
    pub async fn run_once(&self, now: DateTime<Utc>) {
        let from = now - Duration::minutes(self.config.look_back_minutes);
        let until = now + Duration::minutes(self.config.look_ahead_minutes);

        let games = match self.store.games_starting_between(from, until).await {
            Ok(games) => games,
            Err(e) => {
                error!(error = %e, "Failed to query games in reminder window");
                return;
            }
        };
        debug!(candidates = games.len(), "Scanned reminder window");

        // Sequential on purpose: each record's idempotency write lands
        // before the next record starts, so a slow tick cannot widen the
        // duplicate-send exposure beyond one record at a time.
        for stored in &games {
            self.remind(stored).await;
        }
    }

    async fn remind(&self, stored: &StoredGame) {
        let game = &stored.game;
        if game.is_cancelled {
            debug!(game_id = %stored.id, "Game cancelled, skipping reminder");
            return;
        }
        if game.reminder_sent {
            debug!(game_id = %stored.id, "Reminder already sent, skipping");
            return;
        }

        let tokens = match resolve_tokens(self.store.as_ref(), &game.participants).await {
            Ok(tokens) => tokens,
            Err(e) => {
                // Retryable: leave the flag unset and let the next tick try.
                error!(error = %e, game_id = %stored.id, "Failed to resolve participant tokens");
                return;
            }
        };

        if tokens.is_empty() {
            // "No recipients" is handled, not retryable: mark the record so
            // the next tick does not reprocess it.
            info!(game_id = %stored.id, "No device tokens for participants, marking reminded");
            self.mark(&stored.id).await;
            return;
        }

        let title = game.display_title();
        let message = PushMessage::new(
            tokens,
            "Game starting soon!",
            format!("\"{title}\" starts in about an hour."),
        )
        .with_data("type", "game_start_reminder")
        .with_data("gameId", stored.id.as_str());

        match dispatch(self.gateway.as_ref(), &message).await {
            DispatchOutcome::Delivered { .. } => self.mark(&stored.id).await,
            DispatchOutcome::Failed => {
                // Gateway failure is retryable; the record stays unmarked
                // until it falls out of the window.
                warn!(game_id = %stored.id, "Reminder dispatch failed, will retry next tick");
            }
        }
    }

    async fn mark(&self, game_id: &str) {
        match self.store.mark_reminder_sent(game_id).await {
            Ok(true) => {}
            Ok(false) => debug!(game_id = %game_id, "Reminder flag already set by a concurrent tick"),
            Err(e) => error!(error = %e, game_id = %game_id, "Failed to set reminder flag"),
        }
    }
}
