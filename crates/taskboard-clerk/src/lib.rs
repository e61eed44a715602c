#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod service;

pub mod clerk;
pub mod request;
pub mod session;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use request::AuthRequest;
pub use service::AuthService;
pub use session::{RequestState, SessionClaims};

/// Tracing target for authentication operations.
pub const TRACING_TARGET: &str = "taskboard_clerk";

/// Core trait for request authentication against an identity provider.
///
/// Implement this trait to plug in a different provider, or a fake one
/// in tests. Implementations must be cheap to clone behind an `Arc` and
/// free of per-request mutable state.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Validates the credentials carried by `request` with the identity
    /// provider.
    ///
    /// Returns a signed-out [`RequestState`] for absent or rejected
    /// credentials. Errors are reserved for transport-level failures
    /// reaching the provider; the original error text is preserved.
    async fn authenticate(&self, request: &AuthRequest) -> Result<RequestState>;
}
