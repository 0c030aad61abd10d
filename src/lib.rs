//! Push-notification dispatch engine for a shared game-booking document
//! store: detects full -> open capacity transitions, fans notification
//! records out to a user's devices, and sends one-time start reminders.
//!
//! The document store and push gateway are external collaborators,
//! consumed through the [`store::DocumentStore`] and
//! [`gateway::PushGateway`] traits; the embedder constructs both once at
//! startup and passes them into each entry point.

pub mod capacity;
pub mod dispatch;
pub mod error;
pub mod fanout;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod store;

pub use capacity::notify_waitlist_on_spot_open;
pub use dispatch::{dispatch, resolve_tokens, DispatchOutcome};
pub use fanout::{deliver_notification, delivery_allowed};
pub use reminder::{ReminderScheduler, SchedulerConfig};
