use agora_api::{Comment, CommentId, ContentId, UserId};
use chrono::{Duration, Utc};
use rand::Rng;

const NUM_USERS: usize = 4;
const NUM_TOP_LEVEL: usize = 12;
const NUM_REPLIES: usize = 30;
const COMMENT_WORDS: usize = 12;

/// Roughly one reply in this many points at a parent that does not exist
const ORPHAN_ONE_IN: u32 = 10;

/// Roughly one comment in this many was edited after posting
const EDITED_ONE_IN: u32 = 5;

fn main() {
    let mut rng = rand::thread_rng();
    let content = ContentId(String::from("session-demo"));
    let start = Utc::now() - Duration::hours(6);

    let mut comments: Vec<Comment> = Vec::new();
    for i in 0..NUM_TOP_LEVEL {
        let t = start + Duration::minutes(rng.gen_range(0..300));
        comments.push(Comment {
            id: CommentId(format!("c-{i}")),
            content_id: content.clone(),
            parent_comment_id: None,
            is_reply: None,
            content: lipsum::lipsum(COMMENT_WORDS),
            user_id: UserId(format!("u-{}", rng.gen_range(0..NUM_USERS))),
            like_count: rng.gen_range(0..25),
            dislike_count: rng.gen_range(0..5),
            created_at: t,
            updated_at: t,
            is_edited: None,
            replies: None,
        });
    }

    for i in 0..NUM_REPLIES {
        let t = start + Duration::minutes(rng.gen_range(0..300));
        let updated = if rng.gen_ratio(1, EDITED_ONE_IN) {
            t + Duration::minutes(rng.gen_range(1..30))
        } else {
            t
        };
        // replies may attach to any earlier comment, so chains get deep
        let parent = if rng.gen_ratio(1, ORPHAN_ONE_IN) {
            CommentId(String::from("c-gone"))
        } else {
            comments[rng.gen_range(0..comments.len())].id.clone()
        };
        comments.push(Comment {
            id: CommentId(format!("r-{i}")),
            content_id: content.clone(),
            parent_comment_id: Some(parent),
            is_reply: Some(true),
            content: lipsum::lipsum(COMMENT_WORDS),
            user_id: UserId(format!("u-{}", rng.gen_range(0..NUM_USERS))),
            like_count: rng.gen_range(0..10),
            dislike_count: rng.gen_range(0..3),
            created_at: t,
            updated_at: updated,
            is_edited: None,
            replies: None,
        });
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&comments).expect("serializing comments")
    );
}
