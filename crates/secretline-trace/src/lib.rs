//! Logging setup for processes and tests embedding secretline.
//!
//! The secretline crates only emit `tracing` events; this crate installs the
//! subscriber that formats them.

pub mod tracer;

pub use tracer::{LogFormat, TracerError, TracingConfig, init_test_logging, init_tracing};
