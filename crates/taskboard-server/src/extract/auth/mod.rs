//! Authentication and authorization extractors.

mod auth_user;
mod capability;

pub use crate::extract::auth::auth_user::AuthUser;
pub use crate::extract::auth::capability::Capability;
