use std::cmp::Reverse;

use crate::{
    api::{CommentId, SortBy},
    Comment,
};

/// Replies deeper than this are dropped rather than rendered. Also what
/// keeps a cyclic parent chain from recursing forever.
pub const MAX_REPLY_DEPTH: usize = 5;

pub trait SortExt {
    fn sort(&self, comments: &mut [Comment]);
}

impl SortExt for SortBy {
    /// Stable on purpose: ties keep their prior relative order
    fn sort(&self, comments: &mut [Comment]) {
        match self {
            SortBy::Newest => comments.sort_by_key(|c| Reverse(c.created_at)),
            SortBy::Oldest => comments.sort_by_key(|c| c.created_at),
            SortBy::Popular => comments.sort_by_key(|c| Reverse(c.score())),
        }
    }
}

/// Build the display tree for one content item's cached comment array.
///
/// If the backend already nested the data (some comment carries a
/// non-empty `replies`), the reply links are authoritative: only the top
/// level is filtered and sorted, and `replies` is passed through as-is.
/// Otherwise the tree is derived from the flat parent links. The requested
/// sort order applies to top-level comments only; sibling replies always
/// read oldest-first, like a conversation.
pub fn thread_comments(comments: &[Comment], sort_by: SortBy) -> Vec<Comment> {
    if comments.is_empty() {
        return Vec::new();
    }

    if comments.iter().any(|c| !c.replies.is_empty()) {
        let mut top: Vec<Comment> = comments.iter().filter(|c| !c.is_reply()).cloned().collect();
        sort_by.sort(&mut top);
        return top;
    }

    let (top, replies): (Vec<&Comment>, Vec<&Comment>) =
        comments.iter().partition(|c| !c.is_reply());

    let mut roots: Vec<Comment> = top
        .into_iter()
        .map(|c| {
            let mut c = c.clone();
            c.replies = collect_replies(&c.id, &replies, 1);
            c
        })
        .collect();

    let attached: usize = roots.iter().map(|c| descendants(c)).sum();
    if attached < replies.len() {
        tracing::warn!(
            dropped = replies.len() - attached,
            "dropping orphaned or over-deep replies"
        );
    }

    sort_by.sort(&mut roots);
    roots
}

fn collect_replies(parent: &CommentId, pool: &[&Comment], depth: usize) -> Vec<Comment> {
    if depth > MAX_REPLY_DEPTH {
        return Vec::new();
    }
    let mut children: Vec<Comment> = pool
        .iter()
        .filter(|c| c.parent.as_ref() == Some(parent))
        .map(|c| (*c).clone())
        .collect();
    children.sort_by_key(|c| c.created_at);
    for c in children.iter_mut() {
        c.replies = collect_replies(&c.id, pool, depth + 1);
    }
    children
}

fn descendants(c: &Comment) -> usize {
    c.replies.iter().map(|r| 1 + descendants(r)).sum()
}
