use crate::api::{self, CommentId, ContentId, Time, UserId};

/// Client-side comment, normalized at ingestion.
///
/// The wire format carries two redundant reply signals (`is_reply` and
/// `parent_comment_id`, which can disagree) plus an optional pre-nested
/// `replies` array. Here a comment is a reply exactly when `parent` is
/// set: an empty-string parent id from the backend is treated as absent,
/// and the wire flag is dropped. `is_edited` is likewise derived instead
/// of stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub content_id: ContentId,
    pub parent: Option<CommentId>,
    pub content: String,
    pub author: UserId,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: Time,
    pub updated_at: Time,
    pub replies: Vec<Comment>,
}

impl From<api::Comment> for Comment {
    fn from(c: api::Comment) -> Comment {
        Comment {
            id: c.id,
            content_id: c.content_id,
            parent: c.parent_comment_id.filter(|p| !p.0.is_empty()),
            content: c.content,
            author: c.user_id,
            like_count: c.like_count,
            dislike_count: c.dislike_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
            replies: c
                .replies
                .unwrap_or_default()
                .into_iter()
                .map(Comment::from)
                .collect(),
        }
    }
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Net score used by the `popular` sort order
    pub fn score(&self) -> i64 {
        self.like_count - self.dislike_count
    }

    pub fn find_in<'a>(comments: &'a mut [Comment], id: &CommentId) -> Option<&'a mut Comment> {
        for c in comments.iter_mut() {
            if c.id == *id {
                return Some(c);
            }
            if let Some(res) = Comment::find_in(&mut c.replies, id) {
                return Some(res);
            }
        }
        None
    }

    pub fn apply(&mut self, patch: CommentPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(like_count) = patch.like_count {
            self.like_count = like_count;
        }
        if let Some(dislike_count) = patch.dislike_count {
            self.dislike_count = dislike_count;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// Partial update for `CommentStore::update_comment`: absent fields are
/// left alone.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub like_count: Option<i64>,
    pub dislike_count: Option<i64>,
    pub updated_at: Option<Time>,
}
