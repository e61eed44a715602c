//! Provider-agnostic authentication service handle.

use std::sync::Arc;

use crate::{AuthRequest, RequestState, Result, SessionProvider, TRACING_TARGET};

/// Shared handle to a [`SessionProvider`] for dependency injection.
///
/// Constructed once at startup and cloned into request handlers; there is
/// no ambient global client.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn SessionProvider>,
}

impl AuthService {
    /// Wraps a provider implementation.
    pub fn new(provider: impl SessionProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Authenticates one request with the underlying provider.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport-level failures reaching the
    /// provider; rejected credentials yield a signed-out [`RequestState`].
    pub async fn authenticate(&self, request: &AuthRequest) -> Result<RequestState> {
        let state = self.provider.authenticate(request).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            method = %request.method,
            signed_in = state.is_signed_in(),
            "request authenticated"
        );

        Ok(state)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::SessionClaims;

    struct StaticProvider(RequestState);

    #[async_trait::async_trait]
    impl SessionProvider for StaticProvider {
        async fn authenticate(&self, _request: &AuthRequest) -> Result<RequestState> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn delegates_to_provider() {
        let claims = SessionClaims {
            sub: Some("user_1".into()),
            ..SessionClaims::default()
        };
        let service = AuthService::new(StaticProvider(RequestState::signed_in(claims)));

        let request = AuthRequest::new(Method::GET, "http://localhost/tasks");
        let state = service.authenticate(&request).await.unwrap();
        assert!(state.is_signed_in());
    }
}
