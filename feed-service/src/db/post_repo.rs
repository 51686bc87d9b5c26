//! Post store access.
//!
//! Keyset pagination over `(created_at DESC, id DESC)`. The cursor predicate
//! uses a row-value comparison so it matches the ordering lexicographically
//! and stays index-friendly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::{FeedScope, Post};
use crate::services::cursor::Cursor;
use crate::services::sources::PostPageSource;

#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    content: String,
    post_images: Json<Vec<String>>,
    likes_count: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.user_id,
            content: row.content,
            post_images: row.post_images.0,
            likes_count: row.likes_count,
            created_at: row.created_at,
        }
    }
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostPageSource for PostRepository {
    async fn query_page(
        &self,
        scope: &FeedScope,
        cursor: Option<Cursor>,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = match (scope, cursor) {
            (FeedScope::Global, None) => {
                sqlx::query_as::<_, PostRow>(
                    r#"
                    SELECT id, user_id, content, post_images, likes_count, created_at
                    FROM posts
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (FeedScope::Global, Some(cursor)) => {
                sqlx::query_as::<_, PostRow>(
                    r#"
                    SELECT id, user_id, content, post_images, likes_count, created_at
                    FROM posts
                    WHERE (created_at, id) < ($1, $2)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $3
                    "#,
                )
                .bind(cursor.created_at)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (FeedScope::FollowedSet(ids), None) => {
                let author_ids = sorted_ids(ids);
                sqlx::query_as::<_, PostRow>(
                    r#"
                    SELECT id, user_id, content, post_images, likes_count, created_at
                    FROM posts
                    WHERE user_id = ANY($1)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#,
                )
                .bind(&author_ids)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (FeedScope::FollowedSet(ids), Some(cursor)) => {
                let author_ids = sorted_ids(ids);
                sqlx::query_as::<_, PostRow>(
                    r#"
                    SELECT id, user_id, content, post_images, likes_count, created_at
                    FROM posts
                    WHERE user_id = ANY($1)
                      AND (created_at, id) < ($2, $3)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $4
                    "#,
                )
                .bind(&author_ids)
                .bind(cursor.created_at)
                .bind(cursor.id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

fn sorted_ids(ids: &std::collections::HashSet<i64>) -> Vec<i64> {
    let mut out: Vec<i64> = ids.iter().copied().collect();
    out.sort_unstable();
    out
}
