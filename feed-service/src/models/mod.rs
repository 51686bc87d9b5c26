/// Data models for feed-service
///
/// Everything here is a transient, request-scoped view: pages are assembled
/// fresh per call and nothing is cached or persisted by this service.
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as read from the post store. `comments_count` and like state are
/// zero-valued until enrichment fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    /// Ordered image URLs
    pub post_images: Vec<String>,
    /// Server-maintained counter column
    pub likes_count: i64,
    /// Primary feed ordering key; `id` breaks ties
    pub created_at: DateTime<Utc>,
}

/// Read-only author projection owned by the user service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub followers_count: i64,
    pub following_count: i64,
}

/// A post joined with its resolved author, comment count and viewer like
/// state. `author` is `None` when the author lookup succeeded but had no
/// entry for the id (deleted/orphaned account) — the post is still served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPost {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<AuthorProfile>,
    pub comments_count: i64,
    pub is_liked: bool,
}

/// Which authors' posts are eligible for a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// No author restriction
    Global,
    /// Only posts authored by this set (duplicates collapsed, order
    /// irrelevant)
    FollowedSet(HashSet<i64>),
}

impl FeedScope {
    pub fn followed(ids: impl IntoIterator<Item = i64>) -> Self {
        FeedScope::FollowedSet(ids.into_iter().collect())
    }
}

/// One assembled feed page, owned by the request that built it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub items: Vec<EnrichedPost>,
    pub has_more: bool,
    /// Position of the last returned post, present only when more pages
    /// exist. Clients echo these strings back verbatim.
    pub next_cursor: Option<CursorToken>,
}

/// Encoded cursor pair as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorToken {
    pub cursor: String,
    pub cursor_id: String,
}

/// Wire response for both feed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<EnrichedPost>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<CursorToken>,
}

impl From<FeedPage> for FeedResponse {
    fn from(page: FeedPage) -> Self {
        FeedResponse {
            posts: page.items,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }
}
