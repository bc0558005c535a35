//! secretline core
//!
//! Shared vocabulary for secretline: provider specs, secret references and the
//! error type used by every secret store backend. This crate has no async or
//! SDK dependencies so configuration tooling can depend on it alone.

pub mod config;
pub mod error;
pub mod secrets;

pub use error::{BoxError, Error, Result};
pub use secrets::*;
