//! Clerk-backed session provider.

use std::sync::Arc;

use clerk_rs::ClerkConfiguration;
use clerk_rs::clerk::Clerk;
use clerk_rs::validators::authorizer::{ClerkError, validate_jwt};
use clerk_rs::validators::jwks::MemoryCacheJwksProvider;

use super::{ClerkConfig, TRACING_TARGET};
use crate::{AuthRequest, AuthService, Error, ErrorKind, RequestState, SessionClaims};

/// Inner client that holds the JWKS provider and configuration.
struct ClerkClientInner {
    jwks: Arc<MemoryCacheJwksProvider>,
    config: ClerkConfig,
}

/// Clerk-backed implementation of [`SessionProvider`].
///
/// Locates the session token on the request (`Authorization: Bearer` header
/// or `__session` cookie), lets the Clerk SDK validate it against the
/// provider's JWKS, then decodes the verified token's claims. The SDK's
/// in-memory JWKS cache makes repeated validations cheap; the client is a
/// clone-friendly handle around shared state.
///
/// # Examples
///
/// ```rust,ignore
/// use taskboard_clerk::clerk::{ClerkClient, ClerkConfig};
///
/// let config = ClerkConfig::new(secret_key)
///     .with_authorized_party("http://localhost:5173");
/// let auth_service = ClerkClient::new(config).into_service();
/// ```
///
/// [`SessionProvider`]: crate::SessionProvider
#[derive(Clone)]
pub struct ClerkClient {
    inner: Arc<ClerkClientInner>,
}

impl std::fmt::Debug for ClerkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClerkClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ClerkClient {
    /// Creates a new Clerk client with the given configuration.
    pub fn new(config: ClerkConfig) -> Self {
        let clerk_config =
            ClerkConfiguration::new(None, None, Some(config.secret_key.clone()), None);
        let clerk = Clerk::new(clerk_config);
        let jwks = Arc::new(MemoryCacheJwksProvider::new(clerk));

        tracing::debug!(
            target: TRACING_TARGET,
            authorized_parties = config.authorized_parties.len(),
            "Clerk client created"
        );

        Self {
            inner: Arc::new(ClerkClientInner { jwks, config }),
        }
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ClerkConfig {
        &self.inner.config
    }

    /// Converts this client into an [`AuthService`] for dependency injection.
    pub fn into_service(self) -> AuthService {
        AuthService::new(self)
    }

    /// Checks the token's `azp` claim against the configured origins.
    ///
    /// Sessions without an `azp` claim pass; machine tokens do not carry
    /// one.
    fn is_authorized_party(&self, claims: &SessionClaims) -> bool {
        if !self.inner.config.checks_authorized_parties() {
            return true;
        }
        match claims.azp.as_deref() {
            Some(azp) => self
                .inner
                .config
                .authorized_parties
                .iter()
                .any(|party| party == azp),
            None => true,
        }
    }
}

#[async_trait::async_trait]
impl crate::SessionProvider for ClerkClient {
    async fn authenticate(&self, request: &AuthRequest) -> crate::Result<RequestState> {
        let Some(token) = request.session_token() else {
            tracing::debug!(
                target: TRACING_TARGET,
                url = %request.url,
                "no session token on request"
            );
            return Ok(RequestState::signed_out());
        };

        match validate_jwt(token, self.inner.jwks.clone()).await {
            Ok(_verified) => {
                // Signature and expiry were just checked by the SDK; the
                // payload decode below reads the full claim set.
                let claims = SessionClaims::decode_payload(token)?;

                if !self.is_authorized_party(&claims) {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        azp = claims.azp.as_deref().unwrap_or(""),
                        "token minted for an unauthorized party"
                    );
                    return Ok(RequestState::signed_out());
                }

                Ok(RequestState::signed_in(claims))
            }
            Err(ClerkError::Unauthorized(reason)) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    reason = %reason,
                    "session token rejected"
                );
                Ok(RequestState::signed_out())
            }
            Err(ClerkError::InternalServerError(message)) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %message,
                    "identity provider unreachable"
                );
                Err(Error::new(ErrorKind::ServiceUnavailable).with_message(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_parties(parties: &[&str]) -> ClerkClient {
        let mut config = ClerkConfig::new("sk_test_abc123");
        for party in parties {
            config = config.with_authorized_party(*party);
        }
        ClerkClient::new(config)
    }

    fn claims_with_azp(azp: Option<&str>) -> SessionClaims {
        SessionClaims {
            azp: azp.map(str::to_owned),
            ..SessionClaims::default()
        }
    }

    #[test]
    fn azp_check_disabled_without_configured_parties() {
        let client = client_with_parties(&[]);
        assert!(client.is_authorized_party(&claims_with_azp(Some("http://evil.example"))));
    }

    #[test]
    fn azp_must_match_a_configured_party() {
        let client = client_with_parties(&["http://localhost:5173"]);
        assert!(client.is_authorized_party(&claims_with_azp(Some("http://localhost:5173"))));
        assert!(!client.is_authorized_party(&claims_with_azp(Some("http://evil.example"))));
    }

    #[test]
    fn missing_azp_passes() {
        let client = client_with_parties(&["http://localhost:5173"]);
        assert!(client.is_authorized_party(&claims_with_azp(None)));
    }

    #[tokio::test]
    async fn request_without_token_is_signed_out() {
        use crate::SessionProvider as _;

        let client = client_with_parties(&[]);
        let request = AuthRequest::new(http::Method::GET, "http://localhost/tasks");
        let state = client.authenticate(&request).await.unwrap();
        assert!(!state.is_signed_in());
    }
}
