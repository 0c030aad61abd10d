use std::collections::BTreeSet;

use tracing::{error, info, instrument, warn};

use crate::dispatch::dispatch;
use crate::gateway::{PushGateway, PushMessage};
use crate::model::{NotificationCategory, NotificationRecord, UserRecord};
use crate::store::DocumentStore;

/// Notification types that count as game updates even when the record's
/// category says otherwise.
const GAME_UPDATE_KINDS: [&str; 5] =
    ["player_joined", "player_left", "game_cancelled", "game_rescheduled", "spot_open"];

/// Decide whether a user's preference flags permit delivering a
/// notification of the given category and type. Total and default-allow:
/// a profile with no flags set allows everything.
pub fn delivery_allowed(user: &UserRecord, category: NotificationCategory, kind: &str) -> bool {
    match category {
        NotificationCategory::Chat => user.wants_chat_messages(),
        NotificationCategory::Reminder => user.wants_reminders(),
        NotificationCategory::GameUpdate => user.wants_game_updates(),
        NotificationCategory::General => {
            if GAME_UPDATE_KINDS.contains(&kind) {
                user.wants_game_updates()
            } else {
                true
            }
        }
    }
}

/// Handle the creation of a notification document: load the addressed
/// user, apply their preference flags, and push the message to all of
/// their devices.
///
/// There is no dedup here; the store fires the creation event exactly once
/// per document, and that single-fire guarantee is what bounds this
/// handler to at most one dispatch per record.
#[instrument(skip_all, fields(user_id = %record.user_id, kind = %record.kind))]
pub async fn deliver_notification<S, G>(store: &S, gateway: &G, record: &NotificationRecord)
where
    S: DocumentStore + ?Sized,
    G: PushGateway + ?Sized,
{
    if record.user_id.is_empty() || record.message.is_empty() {
        warn!("Notification record missing userId or message, skipping");
        return;
    }

    let user = match store.user(&record.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Addressed user does not exist, skipping");
            return;
        }
        Err(e) => {
            error!(error = %e, "Failed to load addressed user");
            return;
        }
    };

    let tokens: BTreeSet<String> =
        user.fcm_tokens.iter().filter(|t| !t.is_empty()).cloned().collect();
    if tokens.is_empty() {
        info!("Addressed user has no registered devices, skipping");
        return;
    }

    if !delivery_allowed(&user, record.category, &record.kind) {
        info!(category = record.category.as_str(), "Delivery blocked by user preferences");
        return;
    }

    let mut message = PushMessage::new(tokens, "Pickup Games", record.message.clone())
        .with_data("type", record.kind.clone())
        .with_data("category", record.category.as_str());
    // Omit the key entirely when there is no game, rather than sending an
    // empty placeholder.
    if let Some(game_id) = record.game_id.as_deref() {
        if !game_id.is_empty() {
            message = message.with_data("gameId", game_id);
        }
    }

    dispatch(gateway, &message).await;
}
