//! Batched page enrichment.
//!
//! Given one page of posts, resolve author profiles, comment counts and
//! (for authenticated viewers) like state in one batched round trip each,
//! issued concurrently, then join the results back onto the posts in input
//! order. This is the replacement for N+1 per-post remote calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::models::{EnrichedPost, Post};
use crate::services::sources::{
    AuthorBatchResolver, CommentCountBatchResolver, LikeStateBatchResolver,
};

pub struct BatchEnricher {
    authors: Arc<dyn AuthorBatchResolver>,
    comment_counts: Arc<dyn CommentCountBatchResolver>,
    like_state: Arc<dyn LikeStateBatchResolver>,
}

impl BatchEnricher {
    pub fn new(
        authors: Arc<dyn AuthorBatchResolver>,
        comment_counts: Arc<dyn CommentCountBatchResolver>,
        like_state: Arc<dyn LikeStateBatchResolver>,
    ) -> Self {
        Self {
            authors,
            comment_counts,
            like_state,
        }
    }

    /// Enrich `posts` in place-order. Output length and order always equal
    /// the input; a missing author becomes a `None` author on that post,
    /// never a failure of the whole page.
    pub async fn enrich(&self, posts: Vec<Post>, viewer_id: Option<i64>) -> Result<Vec<EnrichedPost>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        // Deduplicate author ids; sorted so the batch request is
        // deterministic. Post ids keep duplicates, the comment service
        // contract tolerates them.
        let mut author_ids: Vec<i64> = posts
            .iter()
            .map(|p| p.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        author_ids.sort_unstable();
        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();

        // Fan-out: the three lookups are independent; all must land before
        // the join step runs.
        let (author_map, count_map, liked) = tokio::try_join!(
            self.authors.authors_by_ids(&author_ids),
            self.comment_counts.comment_counts_by_post_ids(&post_ids),
            self.liked_set(viewer_id, &post_ids),
        )?;

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = author_map.get(&post.author_id).cloned();
                if author.is_none() {
                    warn!(
                        post_id = post.id,
                        author_id = post.author_id,
                        "author missing from batch result, serving placeholder"
                    );
                }
                let comments_count = count_map.get(&post.id).copied().unwrap_or(0);
                let is_liked = liked.contains(&post.id);
                EnrichedPost {
                    author,
                    comments_count,
                    is_liked,
                    post,
                }
            })
            .collect())
    }

    /// Guests skip the like lookup entirely; no empty-viewer RPC is issued.
    async fn liked_set(&self, viewer_id: Option<i64>, post_ids: &[i64]) -> Result<HashSet<i64>> {
        match viewer_id {
            Some(viewer) => self.like_state.liked_post_ids(viewer, post_ids).await,
            None => Ok(HashSet::new()),
        }
    }
}
