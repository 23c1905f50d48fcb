use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    api::{CommentId, CommentStats, ContentId, Time},
    notification::{Notification, NotificationId, NotificationKind, MAX_NOTIFICATIONS},
    Comment, CommentPatch,
};

/// Key for in-progress draft text: either a comment being edited, or a
/// content item's new-comment box.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DraftKey {
    Edit(CommentId),
    New(ContentId),
}

/// Client-side cache of comments plus all the transient UI state around
/// them. Every method is a total, synchronous state transition: there is
/// no I/O in here, and operations on unknown ids are no-ops.
///
/// `set_comments` is the reconciliation point: it replaces a content id's
/// whole array (behind a fresh `Arc`, which is what invalidates memoized
/// derivations) and recomputes the top-level count. The direct
/// `add`/`update`/`delete` mutations are kept for optimistic paths but the
/// sync layer never calls them; it refetches and replaces instead.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentStore {
    comments: HashMap<ContentId, Arc<Vec<Comment>>>,
    counts: HashMap<ContentId, u64>,
    stats: HashMap<ContentId, CommentStats>,
    expanded: HashSet<ContentId>,
    loading: HashSet<String>,
    errors: HashMap<String, String>,
    drafts: HashMap<DraftKey, String>,
    editing: HashSet<CommentId>,
    replying: HashSet<CommentId>,
    notifications: Vec<Notification>,
}

impl CommentStore {
    pub fn new() -> CommentStore {
        CommentStore::default()
    }

    pub fn set_comments(&mut self, content: &ContentId, comments: Vec<Comment>) {
        let top_level = comments.iter().filter(|c| !c.is_reply()).count() as u64;
        self.counts.insert(content.clone(), top_level);
        self.comments.insert(content.clone(), Arc::new(comments));
    }

    /// Optimistic append. Deliberately leaves the count alone: callers are
    /// expected to reconcile with `set_comments` once the backend confirms.
    pub fn add_comment(&mut self, content: &ContentId, comment: Comment) {
        let entry = self
            .comments
            .entry(content.clone())
            .or_insert_with(|| Arc::new(Vec::new()));
        Arc::make_mut(entry).push(comment);
    }

    pub fn update_comment(&mut self, content: &ContentId, comment: &CommentId, patch: CommentPatch) {
        if let Some(list) = self.comments.get_mut(content) {
            if let Some(c) = Comment::find_in(Arc::make_mut(list).as_mut_slice(), comment) {
                c.apply(patch);
            }
        }
    }

    /// Removes a cached comment. Only a top-level removal touches the
    /// count (floored at 0); the count never includes replies.
    pub fn delete_comment(&mut self, content: &ContentId, comment: &CommentId) {
        let list = match self.comments.get_mut(content) {
            Some(l) => Arc::make_mut(l),
            None => return,
        };
        if let Some(pos) = list.iter().position(|c| c.id == *comment) {
            list.remove(pos);
            let count = self.counts.entry(content.clone()).or_insert(0);
            *count = count.saturating_sub(1);
        } else {
            remove_reply(list, comment);
        }
    }

    pub fn comments(&self, content: &ContentId) -> Option<Arc<Vec<Comment>>> {
        self.comments.get(content).cloned()
    }

    pub fn count(&self, content: &ContentId) -> u64 {
        self.counts.get(content).copied().unwrap_or(0)
    }

    pub fn set_count(&mut self, content: &ContentId, count: u64) {
        self.counts.insert(content.clone(), count);
    }

    pub fn increment_count(&mut self, content: &ContentId) {
        *self.counts.entry(content.clone()).or_insert(0) += 1;
    }

    pub fn decrement_count(&mut self, content: &ContentId) {
        let count = self.counts.entry(content.clone()).or_insert(0);
        *count = count.saturating_sub(1);
    }

    /// Server aggregates win over locally derived counts: a present
    /// `total_comments` overrides whatever `set_comments` computed.
    pub fn set_stats(&mut self, content: &ContentId, stats: CommentStats) {
        if let Some(total) = stats.total_comments {
            self.counts.insert(content.clone(), total);
        }
        self.stats.insert(content.clone(), stats);
    }

    pub fn stats(&self, content: &ContentId) -> Option<&CommentStats> {
        self.stats.get(content)
    }

    pub fn toggle_section(&mut self, content: &ContentId) {
        if !self.expanded.remove(content) {
            self.expanded.insert(content.clone());
        }
    }

    pub fn is_expanded(&self, content: &ContentId) -> bool {
        self.expanded.contains(content)
    }

    /// `loading == false` removes the key; absence means not loading, so
    /// the map never accumulates stale entries.
    pub fn set_loading(&mut self, op: &str, loading: bool) {
        if loading {
            self.loading.insert(op.to_owned());
        } else {
            self.loading.remove(op);
        }
    }

    pub fn is_loading(&self, op: &str) -> bool {
        self.loading.contains(op)
    }

    pub fn set_error(&mut self, op: &str, message: impl Into<String>) {
        self.errors.insert(op.to_owned(), message.into());
    }

    pub fn clear_error(&mut self, op: &str) {
        self.errors.remove(op);
    }

    pub fn error(&self, op: &str) -> Option<&str> {
        self.errors.get(op).map(|e| e as &str)
    }

    pub fn add_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        auto_hide: bool,
    ) -> NotificationId {
        let notification = Notification::now(kind, message.into(), auto_hide);
        let id = notification.id;
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        self.notifications.push(notification);
        id
    }

    pub fn remove_notification(&mut self, id: &NotificationId) {
        self.notifications.retain(|n| n.id != *id);
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn visible_notifications(&self, now: Time) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.visible_at(now))
            .collect()
    }

    pub fn prune_notifications(&mut self, now: Time) {
        self.notifications.retain(|n| n.visible_at(now));
    }

    pub fn set_draft(&mut self, key: DraftKey, content: impl Into<String>) {
        self.drafts.insert(key, content.into());
    }

    pub fn clear_draft(&mut self, key: &DraftKey) {
        self.drafts.remove(key);
    }

    pub fn draft(&self, key: &DraftKey) -> Option<&str> {
        self.drafts.get(key).map(|d| d as &str)
    }

    pub fn start_editing(&mut self, comment: &CommentId) {
        self.editing.insert(comment.clone());
    }

    pub fn stop_editing(&mut self, comment: &CommentId) {
        self.editing.remove(comment);
    }

    pub fn is_editing(&self, comment: &CommentId) -> bool {
        self.editing.contains(comment)
    }

    pub fn start_replying(&mut self, comment: &CommentId) {
        self.replying.insert(comment.clone());
    }

    pub fn stop_replying(&mut self, comment: &CommentId) {
        self.replying.remove(comment);
    }

    pub fn is_replying(&self, comment: &CommentId) -> bool {
        self.replying.contains(comment)
    }

    /// Back to the initial empty state, on logout or full invalidation
    pub fn reset(&mut self) {
        *self = CommentStore::new();
    }
}

fn remove_reply(comments: &mut Vec<Comment>, id: &CommentId) -> bool {
    for c in comments.iter_mut() {
        if let Some(pos) = c.replies.iter().position(|r| r.id == *id) {
            c.replies.remove(pos);
            return true;
        }
        if remove_reply(&mut c.replies, id) {
            return true;
        }
    }
    false
}
