//! Clerk client configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result};

/// Configuration for the Clerk client.
///
/// Only `secret_key` is required for request authentication; the remaining
/// keys are recognized so one config block covers the full provider surface
/// (front-end rendering, webhook verification).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ClerkConfig {
    /// Clerk Backend API secret key.
    #[cfg_attr(
        feature = "config",
        arg(long = "clerk-secret-key", env = "CLERK_SECRET_KEY")
    )]
    pub secret_key: String,

    /// Clerk publishable (front-end) key.
    #[cfg_attr(
        feature = "config",
        arg(long = "clerk-publishable-key", env = "CLERK_PUBLISHABLE_KEY")
    )]
    #[serde(default)]
    pub publishable_key: Option<String>,

    /// Explicit JWKS endpoint override.
    #[cfg_attr(
        feature = "config",
        arg(long = "clerk-jwks-url", env = "CLERK_JWKS_URL")
    )]
    #[serde(default)]
    pub jwks_url: Option<String>,

    /// Secret used to verify Clerk webhook signatures.
    #[cfg_attr(
        feature = "config",
        arg(long = "clerk-webhook-secret", env = "CLERK_WEBHOOK_SECRET")
    )]
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// Front-end origins whose tokens are accepted (`azp` claim check).
    #[cfg_attr(
        feature = "config",
        arg(long = "clerk-authorized-party", env = "CLERK_AUTHORIZED_PARTIES", value_delimiter = ',')
    )]
    #[serde(default)]
    pub authorized_parties: Vec<String>,
}

impl ClerkConfig {
    /// Creates a configuration from a secret key.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: None,
            jwks_url: None,
            webhook_secret: None,
            authorized_parties: Vec::new(),
        }
    }

    /// Adds an authorized front-end origin.
    pub fn with_authorized_party(mut self, origin: impl Into<String>) -> Self {
        self.authorized_parties.push(origin.into());
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret key is empty or has an
    /// unexpected prefix.
    pub fn validate(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(Error::new(ErrorKind::Configuration)
                .with_message("Clerk secret key cannot be empty"));
        }

        if !self.secret_key.starts_with("sk_") {
            return Err(Error::new(ErrorKind::Configuration)
                .with_message("Clerk secret key must start with 'sk_'"));
        }

        Ok(())
    }

    /// Returns true when `azp` should be checked against the configured
    /// origins.
    #[must_use]
    pub fn checks_authorized_parties(&self) -> bool {
        !self.authorized_parties.is_empty()
    }
}
