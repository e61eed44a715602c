//! Middleware applied to the HTTP router.

mod auth;

pub use crate::middleware::auth::{
    RouterAuthExt, require_authentication, require_create, require_delete, require_edit,
    require_view,
};
