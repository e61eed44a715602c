//! Clerk-backed [`SessionProvider`] implementation.
//!
//! Credential validation is delegated to the hosted Clerk service through
//! the `clerk-rs` SDK; this module only locates the session token on the
//! request, forwards it, and maps the SDK outcome onto [`RequestState`].
//!
//! [`SessionProvider`]: crate::SessionProvider
//! [`RequestState`]: crate::RequestState

mod client;
mod config;

pub use client::ClerkClient;
pub use config::ClerkConfig;

/// Tracing target for Clerk client operations.
pub const TRACING_TARGET: &str = "taskboard_clerk::clerk";
