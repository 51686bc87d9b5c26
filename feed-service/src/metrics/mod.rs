use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of feed requests by feed kind (global, follow).
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Feed request duration segmented by feed kind",
        &["feed"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total feed requests by feed kind and outcome (ok/error).
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total feed requests segmented by feed kind and outcome",
        &["feed", "outcome"]
    )
    .expect("failed to register feed_request_total");

    /// Feed request failures attributed to the dependency that caused them
    /// ("none" when no dependency is to blame).
    pub static ref FEED_DEPENDENCY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_dependency_errors_total",
        "Feed request failures segmented by blamed dependency",
        &["dependency"]
    )
    .expect("failed to register feed_dependency_errors_total");

    /// Batched upstream calls by dependency and outcome.
    pub static ref UPSTREAM_BATCH_CALLS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_upstream_batch_calls_total",
        "Batched upstream calls segmented by dependency and outcome",
        &["service", "outcome"]
    )
    .expect("failed to register feed_upstream_batch_calls_total");
}
