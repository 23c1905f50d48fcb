use chrono::Datelike;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod backend;
pub use backend::Backend;

mod comment;
pub use comment::{
    Comment, CommentEdit, CommentId, CommentPage, CommentStats, NewComment, Reaction, SortBy,
};

mod content;
pub use content::{ContentId, ContentKind, Role};

mod error;
pub use error::Error;

mod user;
pub use user::UserId;

// See the comments on the `validate` methods: all user-provided input goes
// through here before it is allowed anywhere near the backend.
pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(s.to_string()));
    }
    if s.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(())
}

pub fn validate_time(t: &Time) -> Result<(), Error> {
    // Timestamps outside this range are invariably bugs upstream
    if t.year() < 1970 || t.year() > 9999 {
        return Err(Error::InvalidTime(*t));
    }
    Ok(())
}
