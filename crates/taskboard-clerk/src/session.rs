//! Session outcome and claims asserted by the identity provider.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Claims carried by a Clerk session token.
///
/// All fields are optional at this level; presence requirements (subject,
/// organization) are enforced by the consumer, which decides how each
/// absence maps to an HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user) identifier.
    #[serde(default)]
    pub sub: Option<String>,
    /// Authorized party (the front-end origin the token was minted for).
    #[serde(default)]
    pub azp: Option<String>,
    /// Active organization identifier.
    #[serde(default)]
    pub org_id: Option<String>,
    /// Active organization slug.
    #[serde(default)]
    pub org_slug: Option<String>,
    /// Role within the active organization, e.g. `org:admin`.
    #[serde(default)]
    pub org_role: Option<String>,
    /// Organization-scoped permission grants.
    #[serde(default)]
    pub org_permissions: Option<Vec<String>>,
    /// Legacy permission claim emitted by older token templates.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl SessionClaims {
    /// Decodes the payload segment of a JWT into claims.
    ///
    /// Performs no signature verification; callers must only pass tokens the
    /// provider SDK has already validated.
    pub fn decode_payload(token: &str) -> Result<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| Error::from(malformed_token_error()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| Error::from_source(crate::ErrorKind::Serialization, e)
                .with_message("Failed to decode provider payload"))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Returns the effective permission grants for this session.
    ///
    /// Reads `org_permissions` first and falls back to the `permissions`
    /// claim, then to an empty list. Both claim names are honored for
    /// compatibility with tokens minted before the organization-scoped
    /// template.
    #[must_use]
    pub fn effective_permissions(&self) -> Vec<String> {
        self.org_permissions
            .clone()
            .or_else(|| self.permissions.clone())
            .unwrap_or_default()
    }
}

fn malformed_token_error() -> serde_json::Error {
    serde::de::Error::custom("token has no payload segment")
}

/// Outcome of authenticating one request with the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    signed_in: bool,
    claims: Option<SessionClaims>,
}

impl RequestState {
    /// Creates a signed-in state carrying the session claims.
    pub const fn signed_in(claims: SessionClaims) -> Self {
        Self {
            signed_in: true,
            claims: Some(claims),
        }
    }

    /// Creates a signed-out state (absent or rejected credentials).
    pub const fn signed_out() -> Self {
        Self {
            signed_in: false,
            claims: None,
        }
    }

    /// Returns true when the provider accepted the request's credentials.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// Returns the session claims, if signed in.
    #[must_use]
    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    /// Consumes the state, returning the claims of a signed-in session.
    #[must_use]
    pub fn into_claims(self) -> Option<SessionClaims> {
        self.signed_in.then_some(self.claims).flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_payload(json: &serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(json).unwrap());
        format!("eyJhbGciOiJSUzI1NiJ9.{payload}.sig")
    }

    #[test]
    fn decode_payload_extracts_claims() {
        let token = encode_payload(&serde_json::json!({
            "sub": "user_1",
            "org_id": "org_1",
            "org_permissions": ["org:tasks:view"],
            "exp": 2_000_000_000,
        }));

        let claims = SessionClaims::decode_payload(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("user_1"));
        assert_eq!(claims.org_id.as_deref(), Some("org_1"));
        assert_eq!(
            claims.org_permissions.as_deref(),
            Some(&["org:tasks:view".to_owned()][..])
        );
    }

    #[test]
    fn decode_payload_rejects_tokens_without_segments() {
        assert!(SessionClaims::decode_payload("not-a-jwt").is_err());
    }

    #[test]
    fn effective_permissions_prefers_org_claim() {
        let claims = SessionClaims {
            org_permissions: Some(vec!["org:tasks:view".into()]),
            permissions: Some(vec!["org:tasks:edit".into()]),
            ..SessionClaims::default()
        };
        assert_eq!(claims.effective_permissions(), vec!["org:tasks:view"]);
    }

    #[test]
    fn effective_permissions_falls_back_to_legacy_claim() {
        let claims = SessionClaims {
            permissions: Some(vec!["org:tasks:edit".into()]),
            ..SessionClaims::default()
        };
        assert_eq!(claims.effective_permissions(), vec!["org:tasks:edit"]);
    }

    #[test]
    fn effective_permissions_defaults_to_empty() {
        assert!(SessionClaims::default().effective_permissions().is_empty());
    }

    #[test]
    fn signed_out_state_has_no_claims() {
        let state = RequestState::signed_out();
        assert!(!state.is_signed_in());
        assert!(state.claims().is_none());
        assert!(state.into_claims().is_none());
    }

    #[test]
    fn signed_in_state_exposes_claims() {
        let claims = SessionClaims {
            sub: Some("user_1".into()),
            ..SessionClaims::default()
        };
        let state = RequestState::signed_in(claims.clone());
        assert!(state.is_signed_in());
        assert_eq!(state.into_claims(), Some(claims));
    }
}
