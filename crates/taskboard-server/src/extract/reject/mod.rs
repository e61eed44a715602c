//! Request extractors that reject with the server's [`Error`] type.
//!
//! Drop-in replacements for their axum counterparts that produce structured
//! error responses instead of plain-text rejections.
//!
//! [`Error`]: crate::handler::Error

mod json;
mod path;
mod validate_json;

pub use self::json::Json;
pub use self::path::Path;
pub use self::validate_json::ValidateJson;
