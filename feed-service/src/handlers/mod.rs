pub mod feed;

pub use feed::{get_follow_feed, get_global_feed, metrics_endpoint, FeedHandlerState};
