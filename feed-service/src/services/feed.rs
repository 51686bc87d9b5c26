//! Feed assembly orchestration.
//!
//! decode cursor -> fetch page -> enrich -> emit page. No retries at this
//! layer; a failure from any stage propagates unchanged to the caller and
//! the transport applies its own timeout policy.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{FeedPage, FeedScope};
use crate::services::cursor::Cursor;
use crate::services::enrichment::BatchEnricher;
use crate::services::fetcher::FeedFetcher;
use crate::services::sources::{
    AuthorBatchResolver, CommentCountBatchResolver, LikeStateBatchResolver, PostPageSource,
};

pub struct FeedService {
    fetcher: FeedFetcher,
    enricher: BatchEnricher,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostPageSource>,
        authors: Arc<dyn AuthorBatchResolver>,
        comment_counts: Arc<dyn CommentCountBatchResolver>,
        like_state: Arc<dyn LikeStateBatchResolver>,
    ) -> Self {
        Self {
            fetcher: FeedFetcher::new(posts),
            enricher: BatchEnricher::new(authors, comment_counts, like_state),
        }
    }

    /// Assemble one ordered, enriched feed page.
    ///
    /// `cursor`/`cursor_id` are the raw wire strings; malformed values
    /// decode to the zero cursor and restart the feed. `viewer_id` controls
    /// the optional like-state enrichment only — the scope decides what is
    /// visible.
    pub async fn get_feed(
        &self,
        scope: FeedScope,
        cursor: &str,
        cursor_id: &str,
        page_size: usize,
        viewer_id: Option<i64>,
    ) -> Result<FeedPage> {
        let cursor = Cursor::decode(cursor, cursor_id);
        debug!(?cursor, page_size, "assembling feed page");

        let (posts, has_more) = self.fetcher.fetch(&scope, cursor, page_size).await?;
        let items = self.enricher.enrich(posts, viewer_id).await?;

        let next_cursor = if has_more {
            items
                .last()
                .map(|last| Cursor::new(last.post.created_at, last.post.id).encode())
        } else {
            None
        };

        Ok(FeedPage {
            items,
            has_more,
            next_cursor,
        })
    }
}
