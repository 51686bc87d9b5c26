/// Error types for feed-service
///
/// Fatal errors attribute blame to the failing dependency (post store vs. a
/// named upstream service) so callers and dashboards can tell them apart.
/// Malformed cursors are deliberately NOT an error: they decode to the zero
/// cursor and the request degrades to start-of-feed.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type alias for feed-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Post store unreachable or query failure; retryable server error
    #[error("post store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// A batched upstream call failed entirely (transport/service error)
    #[error("upstream {service} unavailable: {status}")]
    UpstreamUnavailable {
        service: &'static str,
        status: tonic::Status,
    },

    /// Caller's deadline elapsed while a remote call was outstanding
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Missing or unusable caller identity
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request input (not cursors, which degrade silently)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything that should never surface in normal operation
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Dependency label used in logs and metrics, if this error blames one.
    pub fn dependency(&self) -> Option<&'static str> {
        match self {
            AppError::StoreUnavailable(_) => Some("post-store"),
            AppError::UpstreamUnavailable { service, .. } => Some(service),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::StoreUnavailable(_) | AppError::UpstreamUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}
