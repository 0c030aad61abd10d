use thiserror::Error;

/// Failure talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store request failed: {0}")]
    Backend(String),
    #[error("no such document: {collection}/{id}")]
    Missing { collection: &'static str, id: String },
}

/// Failure at the push gateway boundary. Always caught and logged by the
/// dispatcher; never escapes a unit of work.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("push gateway transport failure: {0}")]
    Transport(String),
    #[error("push gateway rejected batch with status {0}")]
    Rejected(u16),
    #[error("unreadable push gateway response: {0}")]
    BadResponse(String),
}
