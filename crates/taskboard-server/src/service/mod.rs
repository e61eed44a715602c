//! Service configuration, state, and task storage.

mod config;
mod error;
mod state;

pub mod tasks;

pub use config::{
    DEFAULT_FREE_TIER_LIMIT, DEFAULT_PRO_TIER_LIMIT, MembershipLimits, ServiceConfig,
};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use state::ServiceState;
pub use tasks::TaskStore;
