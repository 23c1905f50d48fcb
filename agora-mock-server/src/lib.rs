use std::collections::{HashMap, HashSet};

use agora_api::{
    self as api, Backend, CommentEdit, CommentId, CommentPage, CommentStats, ContentId,
    ContentKind, Error, NewComment, Reaction, Time, UserId, Uuid,
};
use async_trait::async_trait;
use chrono::Utc;

/// In-memory stand-in for the comment backend, with the same observable
/// semantics: server-assigned ids and timestamps, server-side counts and
/// stats, per-user mutually-exclusive reactions, cascading delete.
pub struct MockServer {
    user: UserId,
    contents: HashMap<ContentId, Vec<StoredComment>>,
    reactions: HashMap<(CommentId, UserId), Reaction>,
    prenest: bool,
    fail_next: Option<Error>,
}

#[derive(Clone, Debug)]
struct StoredComment {
    id: CommentId,
    content_id: ContentId,
    parent_id: Option<CommentId>,
    author: UserId,
    text: String,
    created_at: Time,
    updated_at: Time,
}

impl MockServer {
    pub fn new(user: UserId) -> MockServer {
        MockServer {
            user,
            contents: HashMap::new(),
            reactions: HashMap::new(),
            prenest: false,
            fail_next: None,
        }
    }

    /// Return pre-nested `replies` from fetches instead of a flat array
    pub fn set_prenest(&mut self, prenest: bool) {
        self.prenest = prenest;
    }

    /// Make the next backend call fail with `err`
    pub fn test_fail_next(&mut self, err: Error) {
        self.fail_next = Some(err);
    }

    /// Total stored comments (including replies) for a content item
    pub fn test_num_comments(&self, content: &ContentId) -> usize {
        self.contents.get(content).map(|l| l.len()).unwrap_or(0)
    }

    fn take_failure(&mut self) -> Result<(), Error> {
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn reaction_count(&self, comment: &CommentId, reaction: Reaction) -> i64 {
        self.reactions
            .iter()
            .filter(|(key, r)| key.0 == *comment && **r == reaction)
            .count() as i64
    }

    fn wire(&self, c: &StoredComment) -> api::Comment {
        api::Comment {
            id: c.id.clone(),
            content_id: c.content_id.clone(),
            parent_comment_id: c.parent_id.clone(),
            is_reply: Some(c.parent_id.is_some()),
            content: c.text.clone(),
            user_id: c.author.clone(),
            like_count: self.reaction_count(&c.id, Reaction::Like),
            dislike_count: self.reaction_count(&c.id, Reaction::Dislike),
            created_at: c.created_at,
            updated_at: c.updated_at,
            is_edited: Some(c.updated_at > c.created_at),
            replies: None,
        }
    }

    fn nest(&self, list: &[StoredComment], parent: &CommentId) -> Vec<api::Comment> {
        let mut children: Vec<&StoredComment> = list
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(parent))
            .collect();
        children.sort_by_key(|c| c.created_at);
        children
            .into_iter()
            .map(|c| {
                let mut w = self.wire(c);
                w.replies = Some(self.nest(list, &c.id));
                w
            })
            .collect()
    }
}

#[async_trait]
impl Backend for MockServer {
    async fn fetch_comments(
        &mut self,
        content: &ContentId,
        _kind: ContentKind,
        page: u32,
        limit: u32,
    ) -> anyhow::Result<CommentPage> {
        self.take_failure()?;
        let list = self.contents.get(content).cloned().unwrap_or_default();
        let top: Vec<&StoredComment> = list.iter().filter(|c| c.parent_id.is_none()).collect();

        let stats = CommentStats {
            total_comments: Some(top.len() as u64),
            total_replies: Some((list.len() - top.len()) as u64),
            unique_commenters: Some(
                list.iter().map(|c| &c.author).collect::<HashSet<_>>().len() as u64,
            ),
            last_comment_at: list.iter().map(|c| c.created_at).max(),
        };

        // Pagination applies to top-level comments; replies ride along with
        // whatever page their thread root landed on.
        let start = (page.max(1) - 1).saturating_mul(limit) as usize;
        let page_top = top.iter().skip(start).take(limit as usize);

        let comments = if self.prenest {
            page_top
                .map(|c| {
                    let mut w = self.wire(c);
                    w.replies = Some(self.nest(&list, &c.id));
                    w
                })
                .collect()
        } else {
            let mut flat: Vec<api::Comment> = page_top.map(|c| self.wire(c)).collect();
            flat.extend(
                list.iter()
                    .filter(|c| c.parent_id.is_some())
                    .map(|c| self.wire(c)),
            );
            flat
        };

        Ok(CommentPage {
            comments,
            stats: Some(stats),
        })
    }

    async fn create_comment(
        &mut self,
        content: &ContentId,
        _kind: ContentKind,
        new: NewComment,
    ) -> anyhow::Result<CommentId> {
        self.take_failure()?;
        new.validate()?;
        let list = self.contents.entry(content.clone()).or_default();
        if let Some(parent) = &new.parent_comment_id {
            if !list.iter().any(|c| c.id == *parent) {
                return Err(Error::CommentNotFound(parent.clone()).into());
            }
        }
        let now = Utc::now();
        let id = CommentId(Uuid::new_v4().to_string());
        list.push(StoredComment {
            id: id.clone(),
            content_id: content.clone(),
            parent_id: new.parent_comment_id,
            author: self.user.clone(),
            text: new.content,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn update_comment(
        &mut self,
        comment: &CommentId,
        edit: CommentEdit,
    ) -> anyhow::Result<()> {
        self.take_failure()?;
        edit.validate()?;
        for list in self.contents.values_mut() {
            if let Some(c) = list.iter_mut().find(|c| c.id == *comment) {
                if c.author != self.user {
                    return Err(Error::PermissionDenied.into());
                }
                c.text = edit.content.clone();
                c.updated_at = Utc::now();
                return Ok(());
            }
        }
        Err(Error::CommentNotFound(comment.clone()).into())
    }

    async fn delete_comment(&mut self, comment: &CommentId) -> anyhow::Result<()> {
        self.take_failure()?;
        for list in self.contents.values_mut() {
            if let Some(c) = list.iter().find(|c| c.id == *comment) {
                if c.author != self.user {
                    return Err(Error::PermissionDenied.into());
                }
                list.retain(|c| c.id != *comment);
                // cascade: drop replies left without a parent chain
                loop {
                    let ids: HashSet<CommentId> = list.iter().map(|c| c.id.clone()).collect();
                    let before = list.len();
                    list.retain(|c| c.parent_id.as_ref().map_or(true, |p| ids.contains(p)));
                    if list.len() == before {
                        break;
                    }
                }
                return Ok(());
            }
        }
        Err(Error::CommentNotFound(comment.clone()).into())
    }

    async fn toggle_reaction(
        &mut self,
        comment: &CommentId,
        reaction: Reaction,
    ) -> anyhow::Result<()> {
        self.take_failure()?;
        if !self
            .contents
            .values()
            .any(|l| l.iter().any(|c| c.id == *comment))
        {
            return Err(Error::CommentNotFound(comment.clone()).into());
        }
        let key = (comment.clone(), self.user.clone());
        match self.reactions.get(&key) {
            // same reaction again toggles it off; a different one replaces
            // it, so like and dislike stay mutually exclusive
            Some(r) if *r == reaction => {
                self.reactions.remove(&key);
            }
            _ => {
                self.reactions.insert(key, reaction);
            }
        }
        Ok(())
    }
}
