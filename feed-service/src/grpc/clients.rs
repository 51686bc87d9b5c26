use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tonic::Code;
use tracing::error;

use grpc_clients::voidspace::comment::v1::GetCommentCountsByPostIdsRequest;
use grpc_clients::voidspace::user::v1::{
    GetFollowedUserIdsRequest, GetUsersByIdsRequest, User,
};
use grpc_clients::GrpcClientPool;

use crate::error::{AppError, Result};
use crate::metrics::UPSTREAM_BATCH_CALLS_TOTAL;
use crate::models::AuthorProfile;
use crate::services::sources::{
    AuthorBatchResolver, CommentCountBatchResolver, FollowGraphSource,
};

/// User Service gRPC client adapter.
/// Provides batched author resolution and the follow-graph lookup.
#[derive(Clone)]
pub struct UserServiceClient {
    pool: Arc<GrpcClientPool>,
}

impl UserServiceClient {
    pub fn from_pool(pool: Arc<GrpcClientPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorBatchResolver for UserServiceClient {
    async fn authors_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, AuthorProfile>> {
        let mut client = self.pool.user();
        let response = client
            .get_users_by_ids(GetUsersByIdsRequest {
                user_ids: ids.to_vec(),
            })
            .await
            .map_err(|status| upstream_error("user-service", status))?
            .into_inner();

        UPSTREAM_BATCH_CALLS_TOTAL
            .with_label_values(&["user-service", "ok"])
            .inc();

        Ok(response
            .users
            .into_iter()
            .map(|user| (user.id, author_from_proto(user)))
            .collect())
    }
}

#[async_trait]
impl FollowGraphSource for UserServiceClient {
    async fn followed_user_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        let mut client = self.pool.user();
        let response = client
            .get_followed_user_ids(GetFollowedUserIdsRequest { user_id })
            .await
            .map_err(|status| upstream_error("user-service", status))?
            .into_inner();

        UPSTREAM_BATCH_CALLS_TOTAL
            .with_label_values(&["user-service", "ok"])
            .inc();

        Ok(response.user_ids)
    }
}

/// Comment Service gRPC client adapter.
/// Provides batched comment-count resolution.
#[derive(Clone)]
pub struct CommentServiceClient {
    pool: Arc<GrpcClientPool>,
}

impl CommentServiceClient {
    pub fn from_pool(pool: Arc<GrpcClientPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentCountBatchResolver for CommentServiceClient {
    async fn comment_counts_by_post_ids(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        let mut client = self.pool.comment();
        let response = client
            .get_comment_counts_by_post_ids(GetCommentCountsByPostIdsRequest {
                post_ids: post_ids.to_vec(),
            })
            .await
            .map_err(|status| upstream_error("comment-service", status))?
            .into_inner();

        UPSTREAM_BATCH_CALLS_TOTAL
            .with_label_values(&["comment-service", "ok"])
            .inc();

        Ok(response.counts)
    }
}

fn author_from_proto(user: User) -> AuthorProfile {
    AuthorProfile {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        avatar_url: user.avatar_url,
        followers_count: user.followers_count,
        following_count: user.following_count,
    }
}

/// Translate a tonic status into the service error taxonomy. A deadline on
/// the channel means the caller's budget elapsed; everything else blames the
/// named upstream.
fn upstream_error(service: &'static str, status: tonic::Status) -> AppError {
    error!(service, code = ?status.code(), "batched upstream call failed");
    UPSTREAM_BATCH_CALLS_TOTAL
        .with_label_values(&[service, "error"])
        .inc();

    match status.code() {
        Code::DeadlineExceeded | Code::Cancelled => AppError::DeadlineExceeded,
        _ => AppError::UpstreamUnavailable { service, status },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_statuses_map_to_deadline_exceeded() {
        let err = upstream_error("user-service", tonic::Status::deadline_exceeded("late"));
        assert!(matches!(err, AppError::DeadlineExceeded));
    }

    #[test]
    fn other_statuses_blame_the_upstream() {
        let err = upstream_error("comment-service", tonic::Status::unavailable("down"));
        match err {
            AppError::UpstreamUnavailable { service, .. } => {
                assert_eq!(service, "comment-service")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn author_conversion_keeps_profile_fields() {
        let user = User {
            id: 5,
            username: "alice".into(),
            display_name: "Alice".into(),
            avatar_url: "https://cdn.voidspace.dev/a.png".into(),
            bio: "hi".into(),
            followers_count: 10,
            following_count: 3,
            created_at: None,
        };
        let author = author_from_proto(user);
        assert_eq!(author.id, 5);
        assert_eq!(author.username, "alice");
        assert_eq!(author.followers_count, 10);
    }
}
