//! Per-viewer like state, owned by the post store.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::services::sources::LikeStateBatchResolver;

#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStateBatchResolver for LikeRepository {
    async fn liked_post_ids(&self, viewer_id: i64, post_ids: &[i64]) -> Result<HashSet<i64>> {
        let liked: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT post_id
            FROM likes
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(viewer_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(liked.into_iter().collect())
    }
}
