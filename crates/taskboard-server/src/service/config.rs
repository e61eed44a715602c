//! App [`state`] configuration.
//!
//! [`state`]: crate::service::ServiceState

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use taskboard_clerk::clerk::ClerkConfig;

use crate::service::{Error, Result};

/// Default free-tier membership limit.
pub const DEFAULT_FREE_TIER_LIMIT: u32 = 2;

/// Default pro-tier membership limit (0 means unlimited).
pub const DEFAULT_PRO_TIER_LIMIT: u32 = 0;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Identity provider (Clerk) configuration.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[serde(flatten)]
    pub clerk: ClerkConfig,

    /// Database connection string.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "DATABASE_URL", default_value = "sqlite://./taskboard.db")
    )]
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Front-end origin allowed to call the API and mint sessions.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "FRONTEND_URL", default_value = "http://localhost:5173")
    )]
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Maximum organization memberships on the free tier.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "FREE_TIER_MEMBERSHIP_LIMIT", default_value_t = DEFAULT_FREE_TIER_LIMIT)
    )]
    #[serde(default = "default_free_tier_limit")]
    pub free_tier_membership_limit: u32,

    /// Maximum organization memberships on the pro tier (0 = unlimited).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "PRO_TIER_MEMBERSHIP_LIMIT", default_value_t = DEFAULT_PRO_TIER_LIMIT)
    )]
    #[serde(default = "default_pro_tier_limit")]
    pub pro_tier_membership_limit: u32,
}

fn default_database_url() -> String {
    "sqlite://./taskboard.db".to_owned()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_owned()
}

fn default_free_tier_limit() -> u32 {
    DEFAULT_FREE_TIER_LIMIT
}

fn default_pro_tier_limit() -> u32 {
    DEFAULT_PRO_TIER_LIMIT
}

impl ServiceConfig {
    /// Creates a configuration from a Clerk secret key, with defaults for
    /// everything else.
    pub fn new(clerk_secret_key: impl Into<String>) -> Self {
        Self {
            clerk: ClerkConfig::new(clerk_secret_key),
            database_url: default_database_url(),
            frontend_url: default_frontend_url(),
            free_tier_membership_limit: DEFAULT_FREE_TIER_LIMIT,
            pro_tier_membership_limit: DEFAULT_PRO_TIER_LIMIT,
        }
    }

    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if the Clerk configuration is invalid or the
    /// front-end URL is empty/malformed.
    pub fn validate(&self) -> Result<()> {
        self.clerk
            .validate()
            .map_err(|e| Error::config(e.to_string()).with_source(e))?;

        if self.frontend_url.is_empty() {
            return Err(Error::config("front-end URL cannot be empty"));
        }

        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://") {
            return Err(Error::config(
                "front-end URL must start with 'http://' or 'https://'",
            ));
        }

        Ok(())
    }

    /// Returns the Clerk configuration with the front-end origin appended
    /// to the authorized parties.
    pub fn clerk_config(&self) -> ClerkConfig {
        let mut clerk = self.clerk.clone();
        if !clerk.authorized_parties.contains(&self.frontend_url) {
            clerk = clerk.with_authorized_party(self.frontend_url.clone());
        }
        clerk
    }
}

/// Organization membership limits per billing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipLimits {
    free_tier: u32,
    pro_tier: u32,
}

impl MembershipLimits {
    /// Creates limits from raw tier values (0 = unlimited).
    pub const fn new(free_tier: u32, pro_tier: u32) -> Self {
        Self {
            free_tier,
            pro_tier,
        }
    }

    /// Returns the free-tier limit, `None` meaning unlimited.
    #[must_use]
    pub const fn free_tier(&self) -> Option<u32> {
        if self.free_tier == 0 {
            None
        } else {
            Some(self.free_tier)
        }
    }

    /// Returns the pro-tier limit, `None` meaning unlimited.
    #[must_use]
    pub const fn pro_tier(&self) -> Option<u32> {
        if self.pro_tier == 0 { None } else { Some(self.pro_tier) }
    }
}

impl From<&ServiceConfig> for MembershipLimits {
    fn from(config: &ServiceConfig) -> Self {
        Self::new(
            config.free_tier_membership_limit,
            config.pro_tier_membership_limit,
        )
    }
}

impl Default for MembershipLimits {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_TIER_LIMIT, DEFAULT_PRO_TIER_LIMIT)
    }
}
