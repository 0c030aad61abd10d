use std::collections::BTreeSet;

use tracing::{error, info};

use crate::gateway::{PushGateway, PushMessage};
use crate::store::DocumentStore;
use crate::error::StoreError;

/// Result of one dispatch attempt. A transport-level gateway failure is
/// absorbed here and surfaced as `Failed`; individual token failures
/// inside an otherwise accepted batch still count as `Delivered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { success: u32, failure: u32 },
    Failed,
}

/// Fetch every listed user concurrently and collect their device tokens
/// into one deduplicated set. Duplicate identifiers are permitted (they
/// cost an extra read, nothing more), absent users are discarded, and
/// empty token strings are filtered out.
pub async fn resolve_tokens<S>(store: &S, user_ids: &[String]) -> Result<BTreeSet<String>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let fetched = futures::future::join_all(user_ids.iter().map(|id| store.user(id))).await;

    let mut tokens = BTreeSet::new();
    for result in fetched {
        let Some(user) = result? else { continue };
        tokens.extend(user.fcm_tokens.into_iter().filter(|t| !t.is_empty()));
    }
    Ok(tokens)
}

/// Send one batch through the gateway. Never propagates a gateway error to
/// the caller; failures are logged and reported as an outcome. Callers are
/// expected to skip the call entirely when the token set is empty.
pub async fn dispatch<G>(gateway: &G, message: &PushMessage) -> DispatchOutcome
where
    G: PushGateway + ?Sized,
{
    let kind = message.data.get("type").map(String::as_str).unwrap_or("unknown");
    match gateway.send(message).await {
        Ok(receipt) => {
            info!(
                kind,
                tokens = message.tokens.len(),
                success = receipt.success,
                failure = receipt.failure,
                "Sent push batch"
            );
            DispatchOutcome::Delivered { success: receipt.success, failure: receipt.failure }
        }
        Err(e) => {
            error!(error = %e, kind, tokens = message.tokens.len(), "Failed to send push batch");
            DispatchOutcome::Failed
        }
    }
}
