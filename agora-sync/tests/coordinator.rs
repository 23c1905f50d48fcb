use std::sync::Arc;

use agora_client::{
    api::{CommentEdit, ContentId, ContentKind, Error, NewComment, Reaction, SortBy, UserId},
    DraftKey, NotificationKind, ThreadCache,
};
use agora_mock_server::MockServer;
use agora_sync::{create_op, fetch_op, Coordinator, DEFAULT_PAGE_LIMIT};

fn coordinator() -> Coordinator<MockServer> {
    Coordinator::new(MockServer::new(UserId(String::from("u-test"))))
}

fn content() -> ContentId {
    ContentId(String::from("session-1"))
}

fn text(s: &str) -> NewComment {
    NewComment {
        content: String::from(s),
        parent_comment_id: None,
    }
}

const KIND: ContentKind = ContentKind::Session;

#[tokio::test]
async fn create_reconciles_through_refetch() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("hello")).await;

    let cached = c.store().comments(&content()).expect("comments cached");
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].content, "hello");
    assert_eq!(c.store().count(&content()), 1);
    assert!(!c.store().is_loading(&create_op(&content())));
    assert!(c
        .store()
        .notifications()
        .iter()
        .any(|n| matches!(n.kind, NotificationKind::Success)));
}

#[tokio::test]
async fn replies_do_not_bump_the_top_level_count() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("top")).await;
    let parent = c.store().comments(&content()).unwrap()[0].id.clone();

    c.store_mut().start_replying(&parent);
    c.store_mut().set_draft(DraftKey::New(content()), "draft");
    c.create(
        &content(),
        KIND,
        NewComment {
            content: String::from("reply"),
            parent_comment_id: Some(parent.clone()),
        },
    )
    .await;

    assert_eq!(c.store().count(&content()), 1);
    assert_eq!(c.store().comments(&content()).unwrap().len(), 2);
    // the reply UI state was cleaned up on success
    assert!(!c.store().is_replying(&parent));
    assert_eq!(c.store().draft(&DraftKey::New(content())), None);
}

#[tokio::test]
async fn failed_mutation_leaves_the_cache_untouched() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("first")).await;
    let before = c.store().comments(&content()).unwrap();

    c.backend_mut().test_fail_next(Error::PermissionDenied);
    c.create(&content(), KIND, text("second")).await;

    let after = c.store().comments(&content()).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(c.store().count(&content()), 1);
    assert!(!c.store().is_loading(&create_op(&content())));
    assert!(c
        .store()
        .notifications()
        .iter()
        .any(|n| matches!(n.kind, NotificationKind::Error)));
}

#[tokio::test]
async fn fetch_errors_are_keyed_for_retry() {
    let mut c = coordinator();
    c.backend_mut()
        .test_fail_next(Error::Unknown(String::from("backend down")));
    c.refresh(&content(), KIND, 1, DEFAULT_PAGE_LIMIT).await;

    assert!(c.store().error(&fetch_op(&content())).is_some());
    assert!(!c.store().is_loading(&fetch_op(&content())));
    assert!(c.store().comments(&content()).is_none());

    // a manual retry succeeds and clears the keyed error
    c.refresh(&content(), KIND, 1, DEFAULT_PAGE_LIMIT).await;
    assert_eq!(c.store().error(&fetch_op(&content())), None);
    assert_eq!(c.store().count(&content()), 0);
}

#[tokio::test]
async fn reactions_are_mutually_exclusive_per_user() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("hot take")).await;
    let id = c.store().comments(&content()).unwrap()[0].id.clone();

    c.react(&content(), KIND, &id, Reaction::Like).await;
    let cached = c.store().comments(&content()).unwrap();
    assert_eq!((cached[0].like_count, cached[0].dislike_count), (1, 0));

    // a dislike replaces the like
    c.react(&content(), KIND, &id, Reaction::Dislike).await;
    let cached = c.store().comments(&content()).unwrap();
    assert_eq!((cached[0].like_count, cached[0].dislike_count), (0, 1));

    // the same reaction again toggles it off
    c.react(&content(), KIND, &id, Reaction::Dislike).await;
    let cached = c.store().comments(&content()).unwrap();
    assert_eq!((cached[0].like_count, cached[0].dislike_count), (0, 0));
}

#[tokio::test]
async fn edit_updates_text_and_clears_editing_state() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("draft thoughts")).await;
    let id = c.store().comments(&content()).unwrap()[0].id.clone();

    c.store_mut().start_editing(&id);
    c.store_mut()
        .set_draft(DraftKey::Edit(id.clone()), "better thoughts");
    c.edit(
        &content(),
        KIND,
        &id,
        CommentEdit {
            content: String::from("better thoughts"),
        },
    )
    .await;

    let cached = c.store().comments(&content()).unwrap();
    assert_eq!(cached[0].content, "better thoughts");
    assert!(cached[0].is_edited());
    assert!(!c.store().is_editing(&id));
    assert_eq!(c.store().draft(&DraftKey::Edit(id)), None);
}

#[tokio::test]
async fn delete_removes_the_thread_and_recounts() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("top")).await;
    let parent = c.store().comments(&content()).unwrap()[0].id.clone();
    c.create(
        &content(),
        KIND,
        NewComment {
            content: String::from("reply"),
            parent_comment_id: Some(parent.clone()),
        },
    )
    .await;
    assert_eq!(c.store().comments(&content()).unwrap().len(), 2);

    c.delete(&content(), KIND, &parent).await;
    assert_eq!(c.store().count(&content()), 0);
    assert!(c.store().comments(&content()).unwrap().is_empty());
}

#[tokio::test]
async fn prenested_fetches_thread_without_rebuilding() {
    let mut c = coordinator();
    c.create(&content(), KIND, text("top")).await;
    let parent = c.store().comments(&content()).unwrap()[0].id.clone();
    for body in ["first reply", "second reply"] {
        c.create(
            &content(),
            KIND,
            NewComment {
                content: String::from(body),
                parent_comment_id: Some(parent.clone()),
            },
        )
        .await;
    }

    c.backend_mut().set_prenest(true);
    c.refresh(&content(), KIND, 1, DEFAULT_PAGE_LIMIT).await;

    let cached = c.store().comments(&content()).unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].replies.len(), 2);
    assert_eq!(c.store().count(&content()), 1);

    // the threading layer passes the nested shape through untouched
    let mut cache = ThreadCache::new();
    let threaded = cache.threaded(c.store(), &content(), SortBy::Newest);
    assert_eq!(threaded.len(), 1);
    assert_eq!(threaded[0].replies.len(), 2);
    assert_eq!(threaded[0].replies[0].content, "first reply");
}
