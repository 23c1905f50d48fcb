use chrono::{Duration, Utc};

use crate::api::{Time, Uuid};

/// Backlog cap; the oldest entry is evicted when a new one would exceed it.
pub const MAX_NOTIFICATIONS: usize = 64;

/// Auto-hidden notifications stay visible this long after creation
pub const AUTO_HIDE_AFTER_SECS: i64 = 5;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NotificationId(pub Uuid);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Time,
    pub auto_hide: bool,
}

impl Notification {
    pub fn now(kind: NotificationKind, message: String, auto_hide: bool) -> Notification {
        Notification {
            id: NotificationId(Uuid::new_v4()),
            kind,
            message,
            created_at: Utc::now(),
            auto_hide,
        }
    }

    pub fn visible_at(&self, now: Time) -> bool {
        !self.auto_hide || now - self.created_at < Duration::seconds(AUTO_HIDE_AFTER_SECS)
    }
}
