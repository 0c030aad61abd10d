use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GatewayError;

/// The batch payload accepted by the push gateway. Field names are part of
/// the gateway contract and must not change.
#[derive(Clone, Debug, Serialize)]
pub struct PushMessage {
    pub tokens: BTreeSet<String>,
    pub notification: PushNotification,
    pub data: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

impl PushMessage {
    pub fn new(tokens: BTreeSet<String>, title: &str, body: String) -> Self {
        Self {
            tokens,
            notification: PushNotification { title: title.to_string(), body },
            data: BTreeMap::new(),
        }
    }

    pub fn with_data(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Per-batch delivery counts reported by the gateway.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct SendReceipt {
    #[serde(rename = "successCount")]
    pub success: u32,
    #[serde(rename = "failureCount")]
    pub failure: u32,
}

/// External push gateway: one batched call per message, per-token outcome
/// counts on success, a transport-level error for the whole batch on
/// failure.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<SendReceipt, GatewayError>;
}

/// Push gateway client posting the batch JSON to a relay endpoint.
#[derive(Clone, Debug)]
pub struct HttpPushGateway {
    endpoint: String,
}

impl HttpPushGateway {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send(&self, message: &PushMessage) -> Result<SendReceipt, GatewayError> {
        let endpoint = self.endpoint.clone();
        let payload = serde_json::to_value(message)
            .map_err(|e| GatewayError::BadResponse(format!("unserializable payload: {e}")))?;
        // ureq is blocking; isolate the call so it never stalls the runtime.
        tokio::task::spawn_blocking(move || post_batch(&endpoint, payload))
            .await
            .map_err(|e| GatewayError::Transport(format!("send task aborted: {e}")))?
    }
}

fn post_batch(endpoint: &str, payload: serde_json::Value) -> Result<SendReceipt, GatewayError> {
    match ureq::post(endpoint).send_json(payload) {
        Ok(resp) => {
            let status = resp.status().as_u16();
            let mut body = resp.into_body();
            let text = body
                .read_to_string()
                .map_err(|e| GatewayError::Transport(format!("failed to read response body: {e}")))?;
            let receipt: SendReceipt = serde_json::from_str(&text)
                .map_err(|e| GatewayError::BadResponse(e.to_string()))?;
            info!(status, success = receipt.success, failure = receipt.failure, "Push gateway accepted batch");
            Ok(receipt)
        }
        Err(ureq::Error::StatusCode(code)) => Err(GatewayError::Rejected(code)),
        Err(e) => Err(GatewayError::Transport(e.to_string())),
    }
}
