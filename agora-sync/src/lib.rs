//! Drives comment operations against a backend and reconciles the result
//! into a [`CommentStore`].
//!
//! Mutations never patch the cached array in place: every successful
//! create/edit/delete/react refetches the content id's comments and
//! replaces them wholesale via `set_comments`. That makes the fetch the
//! single reconciliation point (last writer wins per content id) and
//! keeps optimistic local state from racing a slower-resolving request.
//! Failures stop at this boundary: they are logged and turned into store
//! errors/notifications, never propagated to the caller.

mod http;
pub use http::HttpBackend;

use agora_client::{
    api::{Backend, CommentEdit, CommentId, ContentId, ContentKind, NewComment, Reaction},
    Comment, CommentStore, DraftKey, NotificationKind,
};

pub const DEFAULT_PAGE_LIMIT: u32 = 50;

// Operation ids keying the store's loading and error maps. Fine-grained on
// purpose: editing one comment must not look like a fetch in flight.
pub fn fetch_op(content: &ContentId) -> String {
    format!("fetch-comments-{}", content.0)
}

pub fn create_op(content: &ContentId) -> String {
    format!("create-comment-{}", content.0)
}

pub fn update_op(comment: &CommentId) -> String {
    format!("update-comment-{}", comment.0)
}

pub fn delete_op(comment: &CommentId) -> String {
    format!("delete-comment-{}", comment.0)
}

pub fn react_op(comment: &CommentId) -> String {
    format!("react-comment-{}", comment.0)
}

pub struct Coordinator<B> {
    backend: B,
    store: CommentStore,
}

impl<B: Backend + Send> Coordinator<B> {
    pub fn new(backend: B) -> Coordinator<B> {
        Coordinator {
            backend,
            store: CommentStore::new(),
        }
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CommentStore {
        &mut self.store
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Fetch a page of comments and replace the cached array. Fetch
    /// failures are keyed in the store's error map so the UI can offer a
    /// manual retry.
    pub async fn refresh(&mut self, content: &ContentId, kind: ContentKind, page: u32, limit: u32) {
        let op = fetch_op(content);
        self.store.set_loading(&op, true);
        match self.backend.fetch_comments(content, kind, page, limit).await {
            Ok(fetched) => {
                let comments = fetched.comments.into_iter().map(Comment::from).collect();
                self.store.set_comments(content, comments);
                if let Some(stats) = fetched.stats {
                    self.store.set_stats(content, stats);
                }
                self.store.clear_error(&op);
            }
            Err(err) => {
                tracing::error!(?err, content = %content.0, "failed to fetch comments");
                self.store.set_error(&op, format!("{err:#}"));
                self.store.add_notification(
                    NotificationKind::Error,
                    "Failed to load comments",
                    true,
                );
            }
        }
        self.store.set_loading(&op, false);
    }

    pub async fn create(&mut self, content: &ContentId, kind: ContentKind, new: NewComment) {
        let op = create_op(content);
        let parent = new.parent_comment_id.clone();
        self.store.set_loading(&op, true);
        match self.backend.create_comment(content, kind, new).await {
            Ok(_) => {
                self.store.clear_draft(&DraftKey::New(content.clone()));
                if let Some(parent) = &parent {
                    self.store.stop_replying(parent);
                }
                self.refresh(content, kind, 1, DEFAULT_PAGE_LIMIT).await;
                self.store
                    .add_notification(NotificationKind::Success, "Comment posted", true);
            }
            Err(err) => {
                tracing::error!(?err, content = %content.0, "failed to post comment");
                self.store.add_notification(
                    NotificationKind::Error,
                    "Failed to post comment",
                    true,
                );
            }
        }
        self.store.set_loading(&op, false);
    }

    pub async fn edit(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        comment: &CommentId,
        edit: CommentEdit,
    ) {
        let op = update_op(comment);
        self.store.set_loading(&op, true);
        match self.backend.update_comment(comment, edit).await {
            Ok(()) => {
                self.store.clear_draft(&DraftKey::Edit(comment.clone()));
                self.store.stop_editing(comment);
                self.refresh(content, kind, 1, DEFAULT_PAGE_LIMIT).await;
                self.store
                    .add_notification(NotificationKind::Success, "Comment updated", true);
            }
            Err(err) => {
                tracing::error!(?err, comment = %comment.0, "failed to update comment");
                self.store.add_notification(
                    NotificationKind::Error,
                    "Failed to update comment",
                    true,
                );
            }
        }
        self.store.set_loading(&op, false);
    }

    pub async fn delete(&mut self, content: &ContentId, kind: ContentKind, comment: &CommentId) {
        let op = delete_op(comment);
        self.store.set_loading(&op, true);
        match self.backend.delete_comment(comment).await {
            Ok(()) => {
                self.refresh(content, kind, 1, DEFAULT_PAGE_LIMIT).await;
                self.store
                    .add_notification(NotificationKind::Success, "Comment deleted", true);
            }
            Err(err) => {
                tracing::error!(?err, comment = %comment.0, "failed to delete comment");
                self.store.add_notification(
                    NotificationKind::Error,
                    "Failed to delete comment",
                    true,
                );
            }
        }
        self.store.set_loading(&op, false);
    }

    pub async fn react(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        comment: &CommentId,
        reaction: Reaction,
    ) {
        let op = react_op(comment);
        self.store.set_loading(&op, true);
        match self.backend.toggle_reaction(comment, reaction).await {
            Ok(()) => {
                self.refresh(content, kind, 1, DEFAULT_PAGE_LIMIT).await;
            }
            Err(err) => {
                tracing::error!(?err, comment = %comment.0, "failed to toggle reaction");
                self.store.add_notification(
                    NotificationKind::Error,
                    "Failed to update reaction",
                    true,
                );
            }
        }
        self.store.set_loading(&op, false);
    }
}
