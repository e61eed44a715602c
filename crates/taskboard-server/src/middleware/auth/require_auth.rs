//! Authentication middleware for validating request credentials.
//!
//! This module provides middleware for verifying that requests carry a valid
//! signed-in session before any handler runs.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthUser;
use crate::service::ServiceState;

/// Extension trait for `axum::`[`Router`] to apply authentication middleware.
pub trait RouterAuthExt<S> {
    /// Requires a valid signed-in session for all routes.
    ///
    /// The middleware verifies the session with the identity provider and
    /// caches the resulting identity in the request extensions, so handlers
    /// extracting [`AuthUser`] do not trigger a second verification.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl<S> RouterAuthExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.layer(from_fn_with_state(state, require_authentication))
    }
}

/// Requires a valid signed-in session to proceed with the request.
///
/// All rejection logic lives in the [`AuthUser`] extractor; the middleware
/// only forces it to run before the handler.
pub async fn require_authentication(_: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}
