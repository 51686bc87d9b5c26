pub mod cursor;
pub mod enrichment;
pub mod feed;
pub mod fetcher;
pub mod sources;

pub use cursor::Cursor;
pub use enrichment::BatchEnricher;
pub use feed::FeedService;
pub use fetcher::FeedFetcher;
pub use sources::{
    AuthorBatchResolver, CommentCountBatchResolver, FollowGraphSource, LikeStateBatchResolver,
    PostPageSource,
};
