//! Feed assembly tests over in-memory collaborators.
//!
//! The fakes emulate the store's keyset ordering and count every call so the
//! batching contract (one author batch, one comment-count batch per page)
//! is asserted, not assumed.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use feed_service::error::{AppError, Result};
use feed_service::models::{AuthorProfile, FeedScope, Post};
use feed_service::services::{
    AuthorBatchResolver, BatchEnricher, CommentCountBatchResolver, Cursor, FeedService,
    LikeStateBatchResolver, PostPageSource,
};

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn post(id: i64, author_id: i64, created_secs: i64) -> Post {
    Post {
        id,
        author_id,
        content: format!("post {id}"),
        post_images: vec![],
        likes_count: 0,
        created_at: ts(created_secs),
    }
}

fn author(id: i64, username: &str) -> AuthorProfile {
    AuthorProfile {
        id,
        username: username.to_string(),
        display_name: username.to_string(),
        avatar_url: String::new(),
        followers_count: 0,
        following_count: 0,
    }
}

#[derive(Default)]
struct FakePostStore {
    posts: Vec<Post>,
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl PostPageSource for FakePostStore {
    async fn query_page(
        &self,
        scope: &FeedScope,
        cursor: Option<Cursor>,
        limit: i64,
    ) -> Result<Vec<Post>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(limit > 0, "store limit must be positive, got {limit}");
        if self.fail {
            return Err(AppError::StoreUnavailable(sqlx::Error::PoolTimedOut));
        }

        let mut rows: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| match scope {
                FeedScope::Global => true,
                FeedScope::FollowedSet(ids) => ids.contains(&p.author_id),
            })
            .filter(|p| match cursor {
                None => true,
                Some(c) => (p.created_at, p.id) < (c.created_at, c.id),
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[derive(Default)]
struct FakeAuthors {
    profiles: HashMap<i64, AuthorProfile>,
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl AuthorBatchResolver for FakeAuthors {
    async fn authors_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, AuthorProfile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::UpstreamUnavailable {
                service: "user-service",
                status: tonic::Status::unavailable("down"),
            });
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.profiles.get(id).map(|p| (*id, p.clone())))
            .collect())
    }
}

#[derive(Default)]
struct FakeCommentCounts {
    counts: HashMap<i64, i64>,
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl CommentCountBatchResolver for FakeCommentCounts {
    async fn comment_counts_by_post_ids(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::UpstreamUnavailable {
                service: "comment-service",
                status: tonic::Status::unavailable("down"),
            });
        }
        Ok(post_ids
            .iter()
            .filter_map(|id| self.counts.get(id).map(|c| (*id, *c)))
            .collect())
    }
}

#[derive(Default)]
struct FakeLikes {
    liked: HashSet<(i64, i64)>,
    calls: AtomicUsize,
}

#[async_trait]
impl LikeStateBatchResolver for FakeLikes {
    async fn liked_post_ids(&self, viewer_id: i64, post_ids: &[i64]) -> Result<HashSet<i64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(post_ids
            .iter()
            .filter(|id| self.liked.contains(&(viewer_id, **id)))
            .copied()
            .collect())
    }
}

struct Harness {
    store: Arc<FakePostStore>,
    authors: Arc<FakeAuthors>,
    counts: Arc<FakeCommentCounts>,
    likes: Arc<FakeLikes>,
    feed: FeedService,
}

fn harness(
    store: FakePostStore,
    authors: FakeAuthors,
    counts: FakeCommentCounts,
    likes: FakeLikes,
) -> Harness {
    let store = Arc::new(store);
    let authors = Arc::new(authors);
    let counts = Arc::new(counts);
    let likes = Arc::new(likes);
    let feed = FeedService::new(
        store.clone(),
        authors.clone(),
        counts.clone(),
        likes.clone(),
    );
    Harness {
        store,
        authors,
        counts,
        likes,
        feed,
    }
}

#[tokio::test]
async fn pagination_returns_pages_in_order() {
    let store = FakePostStore {
        posts: (1..=5).map(|i| post(i * 10, 1, i * 100)).collect(),
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(1, author(1, "alice"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", 3, None)
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![50, 40, 30]);
    assert!(page.has_more);

    let all = h
        .feed
        .get_feed(FeedScope::Global, "", "", 5, None)
        .await
        .unwrap();
    assert_eq!(all.items.len(), 5);
    assert!(!all.has_more);
    assert!(all.next_cursor.is_none());
}

#[tokio::test]
async fn oversized_page_size_still_yields_the_full_page() {
    let store = FakePostStore {
        posts: vec![post(2, 1, 200), post(1, 1, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(1, author(1, "alice"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", usize::MAX, None)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(!page.has_more);
}

#[tokio::test]
async fn tie_break_pagination_never_skips_or_duplicates() {
    // Four posts share one timestamp; ordering falls back to id DESC.
    let store = FakePostStore {
        posts: vec![
            post(4, 1, 100),
            post(3, 1, 100),
            post(2, 1, 100),
            post(1, 1, 100),
            post(9, 1, 50),
        ],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(1, author(1, "alice"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let mut seen = Vec::new();
    let mut cursor = (String::new(), String::new());
    loop {
        let page = h
            .feed
            .get_feed(FeedScope::Global, &cursor.0, &cursor.1, 2, None)
            .await
            .unwrap();
        seen.extend(page.items.iter().map(|p| p.post.id));
        match page.next_cursor {
            Some(token) => cursor = (token.cursor, token.cursor_id),
            None => break,
        }
    }

    assert_eq!(seen, vec![4, 3, 2, 1, 9]);
}

#[tokio::test]
async fn enrichment_preserves_order_and_cardinality() {
    // Duplicate author ids across the page.
    let store = FakePostStore {
        posts: vec![post(30, 7, 300), post(20, 8, 200), post(10, 7, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(7, author(7, "alice")), (8, author(8, "bob"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, None)
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![30, 20, 10]);
    assert_eq!(
        page.items[0].author.as_ref().map(|a| a.username.as_str()),
        Some("alice")
    );
    assert_eq!(
        page.items[1].author.as_ref().map(|a| a.username.as_str()),
        Some("bob")
    );
}

#[tokio::test]
async fn exactly_one_batched_call_per_dependency() {
    let store = FakePostStore {
        posts: (1..=20).map(|i| post(i, i % 3, 1000 + i)).collect(),
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: (0..3).map(|i| (i, author(i, "user"))).collect(),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    h.feed
        .get_feed(FeedScope::Global, "", "", 15, Some(99))
        .await
        .unwrap();

    assert_eq!(h.store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.authors.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.counts.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.likes.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_followed_set_short_circuits() {
    let store = FakePostStore {
        posts: vec![post(1, 1, 100)],
        ..Default::default()
    };
    let h = harness(store, Default::default(), Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::followed([]), "", "", 10, Some(1))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_more);
    assert_eq!(h.store.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.authors.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.counts.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enriching_empty_page_issues_no_calls() {
    let authors = Arc::new(FakeAuthors::default());
    let counts = Arc::new(FakeCommentCounts::default());
    let likes = Arc::new(FakeLikes::default());
    let enricher = BatchEnricher::new(authors.clone(), counts.clone(), likes.clone());

    let out = enricher.enrich(Vec::new(), Some(1)).await.unwrap();

    assert!(out.is_empty());
    assert_eq!(authors.calls.load(Ordering::SeqCst), 0);
    assert_eq!(counts.calls.load(Ordering::SeqCst), 0);
    assert_eq!(likes.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_author_becomes_placeholder_not_error() {
    let store = FakePostStore {
        posts: vec![post(2, 7, 200), post(1, 404, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(7, author(7, "alice"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, None)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].author.is_some());
    assert!(page.items[1].author.is_none());
}

#[tokio::test]
async fn guest_requests_skip_the_like_lookup() {
    let store = FakePostStore {
        posts: vec![post(1, 1, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(1, author(1, "alice"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, None)
        .await
        .unwrap();

    assert!(!page.items[0].is_liked);
    assert_eq!(h.likes.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn viewer_like_state_is_joined() {
    let store = FakePostStore {
        posts: vec![post(2, 1, 200), post(1, 1, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(1, author(1, "alice"))]),
        ..Default::default()
    };
    let likes = FakeLikes {
        liked: HashSet::from([(42, 1)]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), likes);

    let page = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, Some(42))
        .await
        .unwrap();

    assert!(!page.items[0].is_liked);
    assert!(page.items[1].is_liked);
}

#[tokio::test]
async fn author_batch_failure_fails_the_page() {
    let store = FakePostStore {
        posts: vec![post(1, 1, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        fail: true,
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let err = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, None)
        .await
        .unwrap_err();
    match err {
        AppError::UpstreamUnavailable { service, .. } => assert_eq!(service, "user-service"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn store_failure_is_attributed_to_the_store() {
    let store = FakePostStore {
        fail: true,
        ..Default::default()
    };
    let h = harness(store, Default::default(), Default::default(), Default::default());

    let err = h
        .feed
        .get_feed(FeedScope::Global, "", "", 10, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
    // No enrichment calls happen once the fetch fails.
    assert_eq!(h.authors.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn follow_scope_restricts_to_followed_authors() {
    let store = FakePostStore {
        posts: vec![post(3, 5, 300), post(2, 6, 200), post(1, 7, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(5, author(5, "alice")), (7, author(7, "carol"))]),
        ..Default::default()
    };
    let h = harness(store, authors, Default::default(), Default::default());

    let page = h
        .feed
        .get_feed(FeedScope::followed([5, 7, 7]), "", "", 10, Some(5))
        .await
        .unwrap();
    let ids: Vec<i64> = page.items.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn end_to_end_two_page_walkthrough() {
    // Store: (id=30,t=300),(id=20,t=200),(id=10,t=100), all by user 5.
    let store = FakePostStore {
        posts: vec![post(30, 5, 300), post(20, 5, 200), post(10, 5, 100)],
        ..Default::default()
    };
    let authors = FakeAuthors {
        profiles: HashMap::from([(5, author(5, "alice"))]),
        ..Default::default()
    };
    let counts = FakeCommentCounts {
        counts: HashMap::from([(30, 2), (20, 0)]),
        ..Default::default()
    };
    let h = harness(store, authors, counts, Default::default());

    let first = h
        .feed
        .get_feed(FeedScope::Global, "", "", 2, None)
        .await
        .unwrap();
    assert!(first.has_more);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].post.id, 30);
    assert_eq!(first.items[0].comments_count, 2);
    assert_eq!(
        first.items[0].author.as_ref().map(|a| a.username.as_str()),
        Some("alice")
    );
    assert_eq!(first.items[1].post.id, 20);
    assert_eq!(first.items[1].comments_count, 0);

    let token = first.next_cursor.expect("first page must carry a cursor");
    assert_eq!(Cursor::decode(&token.cursor, &token.cursor_id), Cursor::new(ts(200), 20));

    let second = h
        .feed
        .get_feed(FeedScope::Global, &token.cursor, &token.cursor_id, 2, None)
        .await
        .unwrap();
    assert!(!second.has_more);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].post.id, 10);
    assert_eq!(second.items[0].comments_count, 0);
    assert_eq!(
        second.items[0].author.as_ref().map(|a| a.username.as_str()),
        Some("alice")
    );
}
