/// Configuration management for feed-service
///
/// Loads configuration from environment variables. Database pool settings
/// come from `db_pool::DbConfig` and gRPC endpoints from
/// `grpc_clients::GrpcConfig`; this struct covers everything else.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Feed pagination settings
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port for the feed API and health checks
    pub http_port: u16,
}

/// Feed pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Page size used when the client does not send one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound applied to client-supplied page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_page_size() -> usize {
    10
}

fn default_max_page_size() -> usize {
    100
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8004),
        };

        let feed = FeedConfig {
            default_page_size: std::env::var("FEED_DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_page_size),
            max_page_size: std::env::var("FEED_MAX_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_page_size),
        };

        Config { app, feed }
    }
}
