//! Capability traits consumed by the feed-assembly pipeline.
//!
//! Each trait is one or two methods wide and is implemented by an adapter
//! over the real collaborator (sqlx repository or gRPC client), which keeps
//! the pipeline testable with in-memory fakes.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthorProfile, FeedScope, Post};
use crate::services::cursor::Cursor;

/// One page of posts from the post store.
#[async_trait]
pub trait PostPageSource: Send + Sync {
    /// Rows ordered `(created_at DESC, id DESC)`, filtered to positions
    /// strictly after `cursor` when one is given, and to the scope's author
    /// set for [`FeedScope::FollowedSet`]. Returns at most `limit` rows.
    async fn query_page(
        &self,
        scope: &FeedScope,
        cursor: Option<Cursor>,
        limit: i64,
    ) -> Result<Vec<Post>>;
}

/// Batched author-profile lookup against the user service.
#[async_trait]
pub trait AuthorBatchResolver: Send + Sync {
    /// `ids` is already deduplicated. Absent entries in the returned map are
    /// not an error; they mean the account no longer exists.
    async fn authors_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, AuthorProfile>>;
}

/// Batched comment-count lookup against the comment service.
#[async_trait]
pub trait CommentCountBatchResolver: Send + Sync {
    /// Post ids with no comments may be absent from the returned map.
    async fn comment_counts_by_post_ids(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>>;
}

/// Batched per-viewer like-state lookup against the post store.
#[async_trait]
pub trait LikeStateBatchResolver: Send + Sync {
    /// Returns the subset of `post_ids` the viewer has liked.
    async fn liked_post_ids(&self, viewer_id: i64, post_ids: &[i64]) -> Result<HashSet<i64>>;
}

/// Follow-graph lookup used to build the follow feed's scope.
#[async_trait]
pub trait FollowGraphSource: Send + Sync {
    async fn followed_user_ids(&self, user_id: i64) -> Result<Vec<i64>>;
}
