//! Authorization middleware for enforcing task capabilities.
//!
//! This module provides one middleware per task capability. Each verifies
//! the session (through the [`AuthUser`] extractor) and then checks the
//! matching permission grant, so the route group behind it never sees an
//! unauthorized identity.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::TRACING_TARGET_AUTHORIZATION;
use crate::extract::{AuthUser, Capability};

/// Requires the identity to hold the given capability.
fn enforce(auth_user: AuthUser, capability: Capability) -> Result<(), Response> {
    match auth_user.authorize(capability) {
        Ok(_) => Ok(()),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_AUTHORIZATION,
                permission = capability.permission(),
                "unauthorized access attempt"
            );
            Err(error.into_response())
        }
    }
}

/// Requires the `org:tasks:view` permission.
pub async fn require_view(auth_user: AuthUser, request: Request, next: Next) -> Response {
    match enforce(auth_user, Capability::View) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// Requires the `org:tasks:edit` permission.
pub async fn require_edit(auth_user: AuthUser, request: Request, next: Next) -> Response {
    match enforce(auth_user, Capability::Edit) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// Requires the `org:tasks:create` permission.
pub async fn require_create(auth_user: AuthUser, request: Request, next: Next) -> Response {
    match enforce(auth_user, Capability::Create) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}

/// Requires the `org:tasks:delete` permission.
pub async fn require_delete(auth_user: AuthUser, request: Request, next: Next) -> Response {
    match enforce(auth_user, Capability::Delete) {
        Ok(()) => next.run(request).await,
        Err(response) => response,
    }
}
