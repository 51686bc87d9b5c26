use std::sync::Arc;
use std::time::Instant;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::metrics::{
    FEED_DEPENDENCY_ERRORS_TOTAL, FEED_REQUEST_DURATION_SECONDS, FEED_REQUEST_TOTAL,
};
use crate::models::{FeedResponse, FeedScope};
use crate::services::sources::FollowGraphSource;
use crate::services::FeedService;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    /// Timestamp component of the keyset cursor; empty or malformed values
    /// restart the feed
    #[serde(default)]
    pub cursor: String,
    /// Id component of the keyset cursor
    #[serde(default)]
    pub cursor_id: String,
    pub page_size: Option<usize>,
}

pub struct FeedHandlerState {
    pub feed: Arc<FeedService>,
    pub follow_graph: Arc<dyn FollowGraphSource>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl FeedHandlerState {
    fn page_size(&self, requested: Option<usize>) -> usize {
        clamp_page_size(requested, self.default_page_size, self.max_page_size)
    }
}

fn clamp_page_size(requested: Option<usize>, default: usize, max: usize) -> usize {
    requested.unwrap_or(default).clamp(1, max)
}

/// `GET /api/v1/feed/global`
///
/// Viewer identity is optional: guests get the page without like state.
pub async fn get_global_feed(
    query: web::Query<FeedQueryParams>,
    http_req: HttpRequest,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let viewer_id = viewer_from_headers(&http_req)?;
    let page_size = state.page_size(query.page_size);

    debug!(?viewer_id, page_size, "global feed request");

    let page = timed("global", async {
        state
            .feed
            .get_feed(
                FeedScope::Global,
                &query.cursor,
                &query.cursor_id,
                page_size,
                viewer_id,
            )
            .await
    })
    .await?;

    Ok(HttpResponse::Ok().json(FeedResponse::from(page)))
}

/// `GET /api/v1/feed/follow`
///
/// Requires a viewer. The followed-id set is resolved through the
/// follow-graph collaborator first, then the same assembly contract runs
/// with a [`FeedScope::FollowedSet`].
pub async fn get_follow_feed(
    query: web::Query<FeedQueryParams>,
    http_req: HttpRequest,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let viewer_id = viewer_from_headers(&http_req)?
        .ok_or_else(|| AppError::Unauthorized("missing x-user-id header".to_string()))?;
    let page_size = state.page_size(query.page_size);

    debug!(viewer_id, page_size, "follow feed request");

    let page = timed("follow", async {
        let followed = state.follow_graph.followed_user_ids(viewer_id).await?;
        state
            .feed
            .get_feed(
                FeedScope::followed(followed),
                &query.cursor,
                &query.cursor_id,
                page_size,
                Some(viewer_id),
            )
            .await
    })
    .await?;

    Ok(HttpResponse::Ok().json(FeedResponse::from(page)))
}

/// `GET /metrics` in Prometheus text format.
pub async fn metrics_endpoint() -> Result<HttpResponse> {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| AppError::Internal(format!("metrics encoding failed: {e}")))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer))
}

/// Viewer identity forwarded by the gateway's auth layer. Absent header
/// means guest; a present but non-numeric header is a client error.
fn viewer_from_headers(req: &HttpRequest) -> Result<Option<i64>> {
    let Some(raw) = req.headers().get("x-user-id") else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map(Some)
        .ok_or_else(|| AppError::BadRequest("invalid x-user-id header".to_string()))
}

async fn timed<T>(
    feed: &str,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    let start = Instant::now();
    let result = fut.await;
    FEED_REQUEST_DURATION_SECONDS
        .with_label_values(&[feed])
        .observe(start.elapsed().as_secs_f64());
    let outcome = if result.is_ok() { "ok" } else { "error" };
    FEED_REQUEST_TOTAL.with_label_values(&[feed, outcome]).inc();
    if let Err(err) = &result {
        let dependency = err.dependency().unwrap_or("none");
        warn!(feed, error = %err, dependency, "feed request failed");
        FEED_DEPENDENCY_ERRORS_TOTAL
            .with_label_values(&[dependency])
            .inc();
    }
    result
}
