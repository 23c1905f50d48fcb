use std::{collections::HashMap, sync::Arc};

use crate::{
    api::{ContentId, SortBy},
    thread::thread_comments,
    Comment, CommentStore,
};

/// Memoizes the threading derivation per (content, sort order).
///
/// The store replaces a content id's array behind a fresh `Arc` on every
/// write, so pointer identity of the source array is enough to detect
/// staleness; a write to one content id never invalidates derivations for
/// another.
#[derive(Clone, Debug, Default)]
pub struct ThreadCache {
    entries: HashMap<(ContentId, SortBy), CacheEntry>,
}

#[derive(Clone, Debug)]
struct CacheEntry {
    source: Arc<Vec<Comment>>,
    threaded: Arc<Vec<Comment>>,
}

impl ThreadCache {
    pub fn new() -> ThreadCache {
        ThreadCache::default()
    }

    pub fn threaded(
        &mut self,
        store: &CommentStore,
        content: &ContentId,
        sort_by: SortBy,
    ) -> Arc<Vec<Comment>> {
        let source = match store.comments(content) {
            Some(s) => s,
            None => return Arc::new(Vec::new()),
        };
        let key = (content.clone(), sort_by);
        if let Some(entry) = self.entries.get(&key) {
            if Arc::ptr_eq(&entry.source, &source) {
                return entry.threaded.clone();
            }
        }
        let threaded = Arc::new(thread_comments(&source, sort_by));
        self.entries.insert(
            key,
            CacheEntry {
                source,
                threaded: threaded.clone(),
            },
        );
        threaded
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
