pub mod like_repo;
pub mod post_repo;

pub use like_repo::LikeRepository;
pub use post_repo::PostRepository;
