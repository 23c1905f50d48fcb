use std::str::FromStr;

use crate::{validate_string, ContentId, Error, Time, UserId};

#[derive(
    Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(String::from("comment-stub"))
    }
}

/// A comment as the backend sends it.
///
/// `parent_comment_id` and `is_reply` are redundant signals for the same
/// fact and may disagree; `replies` is only present when the backend has
/// already nested the tree. The client crate normalizes all three away at
/// ingestion, so nothing past that boundary ever looks at `is_reply`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content_id: ContentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_reply: Option<bool>,
    pub content: String,
    pub user_id: UserId,
    pub like_count: i64,
    pub dislike_count: i64,
    pub created_at: Time,
    pub updated_at: Time,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_edited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<Comment>>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
}

impl NewComment {
    // See comments on other `validate` functions throughout agora-api
    pub fn validate(&self) -> Result<(), Error> {
        validate_string(&self.content)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEdit {
    pub content: String,
}

impl CommentEdit {
    pub fn validate(&self) -> Result<(), Error> {
        validate_string(&self.content)
    }
}

/// One page of comments plus whatever aggregates the backend computed.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CommentStats>,
}

/// Server-computed aggregates. Every field is optional: backends report
/// whatever they have, and a present `total_comments` takes precedence
/// over any locally derived count.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_replies: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_commenters: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_comment_at: Option<Time>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Newest,
    Oldest,
    Popular,
}

impl Default for SortBy {
    fn default() -> SortBy {
        SortBy::Newest
    }
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::Popular => "popular",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<SortBy, String> {
        match s {
            "newest" => Ok(SortBy::Newest),
            "oldest" => Ok(SortBy::Oldest),
            "popular" => Ok(SortBy::Popular),
            _ => Err(format!("unknown sort order {s:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
}

impl FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Reaction, String> {
        match s {
            "like" => Ok(Reaction::Like),
            "dislike" => Ok(Reaction::Dislike),
            _ => Err(format!("unknown reaction {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_parses_the_wire_shape() {
        let raw = r#"{
            "id": "1",
            "contentId": "session-9",
            "parentCommentId": "0",
            "isReply": true,
            "content": "hello",
            "userId": "u-3",
            "likeCount": 2,
            "dislikeCount": 1,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }"#;
        let c: Comment = serde_json::from_str(raw).expect("parsing wire comment");
        assert_eq!(c.id, CommentId(String::from("1")));
        assert_eq!(c.parent_comment_id, Some(CommentId(String::from("0"))));
        assert_eq!(c.is_reply, Some(true));
        assert_eq!(c.replies, None);
        assert_eq!(c.like_count, 2);
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let raw = r#"{
            "id": "1",
            "contentId": "session-9",
            "content": "hello",
            "userId": "u-3",
            "likeCount": 0,
            "dislikeCount": 0,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }"#;
        let c: Comment = serde_json::from_str(raw).expect("parsing wire comment");
        assert_eq!(c.parent_comment_id, None);
        assert_eq!(c.is_reply, None);
        assert_eq!(c.is_edited, None);
        assert_eq!(c.replies, None);
    }

    #[test]
    fn new_comment_validation() {
        let ok = NewComment {
            content: String::from("hi"),
            parent_comment_id: None,
        };
        assert_eq!(ok.validate(), Ok(()));

        let empty = NewComment {
            content: String::from("  "),
            parent_comment_id: None,
        };
        assert_eq!(empty.validate(), Err(Error::EmptyContent));
    }
}
