//! Request extractors used by the handlers.

mod auth;
mod reject;

pub use crate::extract::auth::{AuthUser, Capability};
pub use crate::extract::reject::{Json, Path, ValidateJson};
