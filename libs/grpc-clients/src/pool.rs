//! Channel construction and reuse for inter-service gRPC calls.
//!
//! A tonic `Channel` multiplexes requests over one HTTP/2 connection and is
//! cheap to clone, so the pool holds one channel per upstream and hands out
//! lightweight clients on demand.

use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tracing::info;

use crate::config::GrpcConfig;
use crate::voidspace::comment::v1::comment_service_client::CommentServiceClient;
use crate::voidspace::user::v1::user_service_client::UserServiceClient;

#[derive(Debug, Error)]
pub enum GrpcPoolError {
    #[error("invalid endpoint {url}: {source}")]
    InvalidEndpoint {
        url: String,
        source: tonic::transport::Error,
    },
}

/// Holds one channel per upstream service.
#[derive(Clone)]
pub struct GrpcClientPool {
    user_channel: Channel,
    comment_channel: Channel,
}

impl GrpcClientPool {
    /// Build channels for every upstream from the given configuration.
    ///
    /// Channels connect lazily on first use, so construction succeeds even
    /// when an upstream is temporarily down; per-call timeouts still apply.
    pub fn new(config: &GrpcConfig) -> Result<Self, GrpcPoolError> {
        let user_channel = build_endpoint(&config.user_service_url, config)?.connect_lazy();
        let comment_channel = build_endpoint(&config.comment_service_url, config)?.connect_lazy();

        info!(
            user_service = %config.user_service_url,
            comment_service = %config.comment_service_url,
            "gRPC client pool initialized"
        );

        Ok(Self {
            user_channel,
            comment_channel,
        })
    }

    /// Client for the user service.
    pub fn user(&self) -> UserServiceClient<Channel> {
        UserServiceClient::new(self.user_channel.clone())
    }

    /// Client for the comment service.
    pub fn comment(&self) -> CommentServiceClient<Channel> {
        CommentServiceClient::new(self.comment_channel.clone())
    }
}

fn build_endpoint(url: &str, config: &GrpcConfig) -> Result<Endpoint, GrpcPoolError> {
    Endpoint::from_shared(url.to_string())
        .map_err(|source| GrpcPoolError::InvalidEndpoint {
            url: url.to_string(),
            source,
        })
        .map(|endpoint| {
            endpoint
                .connect_timeout(Duration::from_secs(config.connection_timeout_secs))
                .timeout(Duration::from_secs(config.request_timeout_secs))
        })
}
