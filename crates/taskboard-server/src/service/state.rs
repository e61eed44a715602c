//! Application state and dependency injection.

use taskboard_clerk::AuthService;
use taskboard_clerk::clerk::ClerkClient;

use crate::service::tasks::TaskStore;
use crate::service::{MembershipLimits, Result, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Constructed
/// once at startup; every field is a cheap clone handle.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    auth_service: AuthService,
    task_store: TaskStore,
    membership_limits: MembershipLimits,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Builds the Clerk client with the configured secret key and the
    /// front-end origin as an authorized party.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let clerk_client = ClerkClient::new(config.clerk_config());

        Ok(Self {
            auth_service: clerk_client.into_service(),
            task_store: TaskStore::new(),
            membership_limits: MembershipLimits::from(config),
        })
    }

    /// Creates state around an existing authentication service.
    ///
    /// Intended for tests and embedders that supply their own
    /// [`SessionProvider`].
    ///
    /// [`SessionProvider`]: taskboard_clerk::SessionProvider
    pub fn with_auth_service(auth_service: AuthService) -> Self {
        Self {
            auth_service,
            task_store: TaskStore::new(),
            membership_limits: MembershipLimits::default(),
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(auth_service: AuthService);
impl_di!(task_store: TaskStore);
impl_di!(membership_limits: MembershipLimits);
