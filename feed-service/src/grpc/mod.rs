//! gRPC client adapters for calling other services (centralized).
//!
//! The feed pipeline consumes these through the capability traits in
//! `services::sources`; the adapters translate tonic statuses into the
//! service error taxonomy and record per-upstream metrics.

pub mod clients;

pub use clients::{CommentServiceClient, UserServiceClient};
