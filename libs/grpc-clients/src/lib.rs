//! gRPC Clients Library
//!
//! Centralizes gRPC client code and provides a unified interface for
//! inter-service communication.
//!
//! This library:
//! - Carries the vendored prost/tonic client modules for the user and
//!   comment services (regenerable from the `.proto` sources under
//!   `proto/`; vendored so builds do not require protoc)
//! - Provides channel construction and reuse via [`pool::GrpcClientPool`]
//! - Loads endpoint configuration from the environment via
//!   [`config::GrpcConfig`]

pub mod config;
pub mod pool;

pub use config::GrpcConfig;
pub use pool::{GrpcClientPool, GrpcPoolError};

// Vendored proto client modules
pub mod voidspace {
    pub mod user {
        pub mod v1 {
            include!("gen/voidspace.user.v1.rs");
        }
    }
    pub mod comment {
        pub mod v1 {
            include!("gen/voidspace.comment.v1.rs");
        }
    }
}
