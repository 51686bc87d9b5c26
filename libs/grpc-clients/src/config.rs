//! gRPC Configuration
//!
//! Manages service endpoint configuration for inter-service gRPC calls.
//! Supports environment-based configuration for different deployments.
use std::env;

#[derive(Debug, Clone)]
pub struct GrpcConfig {
    /// User Service endpoint
    pub user_service_url: String,

    /// Comment Service endpoint
    pub comment_service_url: String,

    /// gRPC connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// gRPC request timeout in seconds
    pub request_timeout_secs: u64,
}

impl GrpcConfig {
    /// Load configuration from environment variables.
    /// Falls back to in-cluster defaults for development.
    pub fn from_env() -> Self {
        Self {
            user_service_url: env::var("GRPC_USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://user-service:9080".to_string()),
            comment_service_url: env::var("GRPC_COMMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://comment-service:9080".to_string()),
            connection_timeout_secs: env::var("GRPC_CONNECTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            request_timeout_secs: env::var("GRPC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
