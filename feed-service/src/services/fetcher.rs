//! Page fetch over the post store.
//!
//! Requests one row more than the page size to detect whether another page
//! exists, then truncates. An empty followed set short-circuits without
//! touching the store (an `IN ()` predicate can never match).

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{FeedScope, Post};
use crate::services::cursor::Cursor;
use crate::services::sources::PostPageSource;

pub struct FeedFetcher {
    source: Arc<dyn PostPageSource>,
}

impl FeedFetcher {
    pub fn new(source: Arc<dyn PostPageSource>) -> Self {
        Self { source }
    }

    /// Fetch one page of raw posts plus a `has_more` flag.
    pub async fn fetch(
        &self,
        scope: &FeedScope,
        cursor: Cursor,
        page_size: usize,
    ) -> Result<(Vec<Post>, bool)> {
        if let FeedScope::FollowedSet(ids) = scope {
            if ids.is_empty() {
                debug!("empty followed set, returning empty page without querying");
                return Ok((Vec::new(), false));
            }
        }

        let cursor = if cursor.is_zero() { None } else { Some(cursor) };
        // Saturate rather than wrap if the caller hands us a page size
        // beyond i64; the store limit must stay positive.
        let limit = i64::try_from(page_size)
            .unwrap_or(i64::MAX)
            .saturating_add(1);
        let mut posts = self.source.query_page(scope, cursor, limit).await?;

        let has_more = posts.len() > page_size;
        if has_more {
            posts.truncate(page_size);
        }

        Ok((posts, has_more))
    }
}
