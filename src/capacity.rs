use tracing::{error, info, instrument};

use crate::dispatch::{dispatch, resolve_tokens};
use crate::gateway::{PushGateway, PushMessage};
use crate::model::GameRecord;
use crate::store::DocumentStore;

/// Handle a game document write by comparing the before/after snapshots.
/// When the game goes from full to having an open spot and someone is
/// waiting, every waitlisted user gets one alert.
///
/// Creates and deletes are ignored: both snapshots must exist. There is no
/// idempotency marking here; a game that flaps full -> open -> full -> open
/// re-fires on each qualifying transition, which is correct because the
/// waitlist itself changes between them. Dispatch failures are logged and
/// swallowed; retry belongs to the event-delivery layer.
#[instrument(skip_all, fields(game_id = %game_id))]
pub async fn notify_waitlist_on_spot_open<S, G>(
    store: &S,
    gateway: &G,
    game_id: &str,
    before: Option<&GameRecord>,
    after: Option<&GameRecord>,
) where
    S: DocumentStore + ?Sized,
    G: PushGateway + ?Sized,
{
    let (Some(before), Some(after)) = (before, after) else {
        // Only updates carry a capacity transition.
        return;
    };

    // A document written before capacity was configured reports zero; fall
    // back to the current capacity for the "was full" comparison.
    let previous_capacity = if before.max_players > 0 { before.max_players } else { after.max_players };
    let was_full = before.participants.len() as u32 >= previous_capacity;
    let now_has_spot = (after.participants.len() as u32) < after.max_players;

    if !was_full || !now_has_spot {
        return;
    }
    if after.waitlist.is_empty() {
        return;
    }

    // Capacity alerts are unconditional: no preference filtering for the
    // waitlist, everyone asked to be told about exactly this.
    let tokens = match resolve_tokens(store, &after.waitlist).await {
        Ok(tokens) => tokens,
        Err(e) => {
            error!(error = %e, "Failed to resolve waitlist tokens");
            return;
        }
    };
    if tokens.is_empty() {
        info!(waitlisted = after.waitlist.len(), "No device tokens found for waitlisted users");
        return;
    }

    let title = after.display_title();
    let message = PushMessage::new(
        tokens,
        "A spot just opened!",
        format!("A spot is now available in \"{title}\"."),
    )
    .with_data("type", "spot_open")
    .with_data("gameId", game_id)
    .with_data("title", title);

    dispatch(gateway, &message).await;
}
