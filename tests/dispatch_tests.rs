mod common;

use std::collections::BTreeSet;

use common::{user_with_tokens, MemoryStore, RecordingGateway};
use pickup_push::gateway::PushMessage;
use pickup_push::{dispatch, resolve_tokens, DispatchOutcome};

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|i| i.to_string()).collect()
}

#[tokio::test]
async fn resolving_repeated_ids_yields_same_set_as_distinct_ids() {
    let store = MemoryStore::new()
        .with_user("e", user_with_tokens(&["t1"]))
        .with_user("f", user_with_tokens(&["t1", "t2"]));

    let repeated = resolve_tokens(&store, &ids(&["e", "f", "e", "e"])).await.unwrap();
    let distinct = resolve_tokens(&store, &ids(&["e", "f"])).await.unwrap();

    let expected: BTreeSet<String> = ["t1", "t2"].iter().map(|t| t.to_string()).collect();
    assert_eq!(repeated, expected);
    assert_eq!(repeated, distinct);
}

#[tokio::test]
async fn absent_users_and_empty_tokens_are_dropped() {
    let store = MemoryStore::new().with_user("e", user_with_tokens(&["", "t1"]));

    let tokens = resolve_tokens(&store, &ids(&["ghost", "e"])).await.unwrap();

    let expected: BTreeSet<String> = ["t1"].iter().map(|t| t.to_string()).collect();
    assert_eq!(tokens, expected);
}

#[tokio::test]
async fn resolving_no_ids_yields_empty_set() {
    let store = MemoryStore::new();
    let tokens = resolve_tokens(&store, &[]).await.unwrap();
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn gateway_error_becomes_failed_outcome() {
    let gateway = RecordingGateway::failing();
    let tokens: BTreeSet<String> = ["t1"].iter().map(|t| t.to_string()).collect();
    let message = PushMessage::new(tokens, "title", "body".to_string());

    let outcome = dispatch(&gateway, &message).await;

    assert_eq!(outcome, DispatchOutcome::Failed);
}

#[tokio::test]
async fn accepted_batch_reports_receipt_counts() {
    let gateway = RecordingGateway::new();
    let tokens: BTreeSet<String> = ["t1", "t2"].iter().map(|t| t.to_string()).collect();
    let message = PushMessage::new(tokens, "title", "body".to_string());

    let outcome = dispatch(&gateway, &message).await;

    assert_eq!(outcome, DispatchOutcome::Delivered { success: 2, failure: 0 });
}

#[test]
fn push_message_serializes_to_gateway_schema() {
    let tokens: BTreeSet<String> = ["t1"].iter().map(|t| t.to_string()).collect();
    let message = PushMessage::new(tokens, "A spot just opened!", "body".to_string())
        .with_data("type", "spot_open")
        .with_data("gameId", "g1");

    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(value["tokens"], serde_json::json!(["t1"]));
    assert_eq!(value["notification"]["title"], "A spot just opened!");
    assert_eq!(value["notification"]["body"], "body");
    assert_eq!(value["data"]["type"], "spot_open");
    assert_eq!(value["data"]["gameId"], "g1");
}
