#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::handler::{Error, ErrorKind, Result};

/// Tracing target for authentication decisions.
pub const TRACING_TARGET_AUTHENTICATION: &str = "taskboard_server::authentication";

/// Tracing target for authorization (capability gate) decisions.
pub const TRACING_TARGET_AUTHORIZATION: &str = "taskboard_server::authorization";
