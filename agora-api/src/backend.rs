use async_trait::async_trait;

use crate::{CommentEdit, CommentId, CommentPage, ContentId, ContentKind, NewComment, Reaction};

/// The comment operations a backend must support. Implemented over HTTP by
/// `agora-sync` and in memory by `agora-mock-server`.
///
/// Reaction toggling is mutually exclusive per user: setting one reaction
/// clears the other. That invariant lives behind this trait; callers only
/// ever see the refetched, server-authoritative counts.
#[async_trait]
pub trait Backend {
    async fn fetch_comments(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        page: u32,
        limit: u32,
    ) -> anyhow::Result<CommentPage>;

    async fn create_comment(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        new: NewComment,
    ) -> anyhow::Result<CommentId>;

    async fn update_comment(&mut self, comment: &CommentId, edit: CommentEdit)
        -> anyhow::Result<()>;

    async fn delete_comment(&mut self, comment: &CommentId) -> anyhow::Result<()>;

    async fn toggle_reaction(
        &mut self,
        comment: &CommentId,
        reaction: Reaction,
    ) -> anyhow::Result<()>;
}
