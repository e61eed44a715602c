//! Authentication and authorization middleware.

mod require_auth;
mod require_capability;

pub use crate::middleware::auth::require_auth::{RouterAuthExt, require_authentication};
pub use crate::middleware::auth::require_capability::{
    require_create, require_delete, require_edit, require_view,
};
