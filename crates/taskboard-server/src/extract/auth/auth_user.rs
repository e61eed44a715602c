//! Authenticated identity extractor.
//!
//! [`AuthUser`] performs the full request-authentication chain: the inbound
//! request is adapted into the provider shape, forwarded to the identity
//! provider, and the returned claims are checked for the subject and
//! organization before the identity is constructed. The verified identity
//! is cached in the request extensions so later extractions within the same
//! request are free.
//!
//! # Error mapping
//!
//! - no signed-in session, or a session without a user id →
//!   [`ErrorKind::Unauthenticated`] (401)
//! - signed-in session without an organization →
//!   [`ErrorKind::MissingOrganization`] (400)
//! - transport failure reaching the provider →
//!   [`ErrorKind::AuthServiceUnavailable`] (500), carrying the original
//!   error text

use std::collections::HashSet;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use taskboard_clerk::{AuthRequest, AuthService, SessionClaims};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::extract::Capability;
use crate::handler::{Error, ErrorKind, Result};

/// An authenticated, organization-scoped identity.
///
/// Constructible only from provider claims that carry both a user id and an
/// organization id; it never outlives the request it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    user_id: String,
    organization_id: String,
    permissions: HashSet<String>,
}

impl AuthUser {
    /// Builds an identity from session claims.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Unauthenticated`] when the subject claim is
    /// absent or empty, and with [`ErrorKind::MissingOrganization`] when the
    /// organization claim is. Permission grants come from the
    /// `org_permissions` claim, falling back to the `permissions` claim,
    /// falling back to no grants.
    pub fn from_claims(claims: SessionClaims) -> Result<Self> {
        let user_id = match claims.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub.to_owned(),
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    "signed-in session carries no user id"
                );
                return Err(ErrorKind::Unauthenticated
                    .with_message("Not Authenticated: Missing user ID."));
            }
        };

        let organization_id = match claims.org_id.as_deref() {
            Some(org_id) if !org_id.is_empty() => org_id.to_owned(),
            _ => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    user_id = %user_id,
                    "signed-in user has no active organization"
                );
                return Err(ErrorKind::MissingOrganization.into_error());
            }
        };

        let permissions: HashSet<String> = claims.effective_permissions().into_iter().collect();

        Ok(Self {
            user_id,
            organization_id,
            permissions,
        })
    }

    /// Returns the user id (`sub` claim).
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the organization id.
    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// Returns true when the identity holds the given permission string.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Returns true when the identity holds the capability's permission.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.has_permission(capability.permission())
    }

    /// Can view tasks.
    #[must_use]
    pub fn can_view(&self) -> bool {
        self.can(Capability::View)
    }

    /// Can edit tasks.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.can(Capability::Edit)
    }

    /// Can create tasks.
    #[must_use]
    pub fn can_create(&self) -> bool {
        self.can(Capability::Create)
    }

    /// Can delete tasks.
    #[must_use]
    pub fn can_delete(&self) -> bool {
        self.can(Capability::Delete)
    }

    /// Enforces a capability, passing the identity through unchanged.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::Forbidden`] and the capability's denial
    /// message when the permission is not held.
    pub fn authorize(self, capability: Capability) -> Result<Self> {
        if self.can(capability) {
            return Ok(self);
        }

        tracing::debug!(
            target: crate::TRACING_TARGET_AUTHORIZATION,
            user_id = %self.user_id,
            org_id = %self.organization_id,
            permission = capability.permission(),
            "capability denied"
        );

        Err(ErrorKind::Forbidden.with_message(capability.denied_message()))
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Reuse the identity verified earlier in this request, if any.
        if let Some(auth_user) = parts.extensions.get::<Self>() {
            return Ok(auth_user.clone());
        }

        let auth_service = AuthService::from_ref(state);
        let auth_request = AuthRequest::from_parts(parts);

        let request_state = auth_service.authenticate(&auth_request).await.map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %error,
                "identity provider call failed"
            );
            ErrorKind::AuthServiceUnavailable
                .with_context(error.to_string())
        })?;

        let Some(claims) = request_state.into_claims() else {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "request has no signed-in session"
            );
            return Err(ErrorKind::Unauthenticated.with_message("User is not signed in."));
        };

        let auth_user = Self::from_claims(claims)?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            user_id = %auth_user.user_id,
            org_id = %auth_user.organization_id,
            permissions = auth_user.permissions.len(),
            "request authenticated"
        );

        // Cache for subsequent extractors in the same request.
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthService: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <Self as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(auth_user) => Ok(Some(auth_user)),
            // An unreachable provider is not an anonymous request.
            Err(error) if error.kind() == ErrorKind::AuthServiceUnavailable => Err(error),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(
        sub: Option<&str>,
        org_id: Option<&str>,
        org_permissions: Option<&[&str]>,
        permissions: Option<&[&str]>,
    ) -> SessionClaims {
        SessionClaims {
            sub: sub.map(str::to_owned),
            org_id: org_id.map(str::to_owned),
            org_permissions: org_permissions
                .map(|p| p.iter().map(|s| (*s).to_owned()).collect()),
            permissions: permissions.map(|p| p.iter().map(|s| (*s).to_owned()).collect()),
            ..SessionClaims::default()
        }
    }

    #[test]
    fn identity_requires_user_id() {
        let error = AuthUser::from_claims(claims(None, Some("org_1"), None, None)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn identity_requires_organization() {
        let error = AuthUser::from_claims(claims(Some("u1"), None, None, None)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingOrganization);

        let error =
            AuthUser::from_claims(claims(Some("u1"), Some(""), None, None)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingOrganization);
    }

    #[test]
    fn organization_check_ignores_permission_content() {
        let error = AuthUser::from_claims(claims(
            Some("u1"),
            None,
            Some(&["org:tasks:view", "org:tasks:delete"]),
            None,
        ))
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingOrganization);
    }

    #[test]
    fn capability_checks_are_membership_tests() {
        let user = AuthUser::from_claims(claims(
            Some("u1"),
            Some("o1"),
            Some(&["org:tasks:view"]),
            None,
        ))
        .unwrap();

        assert!(user.can_view());
        assert!(!user.can_edit());
        assert!(!user.can_create());
        assert!(!user.can_delete());
    }

    #[test]
    fn permissions_fall_back_to_legacy_claim() {
        let user = AuthUser::from_claims(claims(
            Some("u1"),
            Some("o1"),
            None,
            Some(&["org:tasks:edit"]),
        ))
        .unwrap();

        assert!(user.can_edit());
        assert!(!user.can_view());
    }

    #[test]
    fn empty_grants_deny_everything() {
        let user = AuthUser::from_claims(claims(Some("u1"), Some("o1"), None, None)).unwrap();
        assert!(!user.can_view());
        assert!(!user.can_edit());
        assert!(!user.can_create());
        assert!(!user.can_delete());
    }

    #[test]
    fn authorize_passes_the_identity_through() {
        let user = AuthUser::from_claims(claims(
            Some("u1"),
            Some("o1"),
            Some(&["org:tasks:create"]),
            None,
        ))
        .unwrap();

        let passed = user.clone().authorize(Capability::Create).unwrap();
        assert_eq!(passed, user);
    }

    #[test]
    fn authorize_rejects_each_missing_capability_independently() {
        let view_only = AuthUser::from_claims(claims(
            Some("u1"),
            Some("o1"),
            Some(&["org:tasks:view"]),
            None,
        ))
        .unwrap();

        for capability in [Capability::Edit, Capability::Create, Capability::Delete] {
            let error = view_only.clone().authorize(capability).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Forbidden);
            assert_eq!(error.message(), Some(capability.denied_message()));
        }
    }
}
