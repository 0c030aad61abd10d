pub mod game;
pub mod notification;
pub mod user;

pub use game::{GameRecord, StoredGame};
pub use notification::{NotificationCategory, NotificationRecord};
pub use user::UserRecord;
