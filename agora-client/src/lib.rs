mod cache;
pub use cache::ThreadCache;

mod comment;
pub use comment::{Comment, CommentPatch};

pub mod gate;
pub use gate::Access;

mod notification;
pub use notification::{
    Notification, NotificationId, NotificationKind, AUTO_HIDE_AFTER_SECS, MAX_NOTIFICATIONS,
};

mod store;
pub use store::{CommentStore, DraftKey};

mod thread;
pub use thread::{thread_comments, SortExt, MAX_REPLY_DEPTH};

pub mod api {
    pub use agora_api::*;
}

pub mod prelude {
    pub use crate::SortExt;
}
