//! Subscriber initialization and configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Invalid log filter: {0}")]
    Filter(String),
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    /// Filter directives used when `RUST_LOG` is not set.
    pub filter: String,
    pub format: LogFormat,
    pub with_target: bool,
    pub with_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: "info".to_string(),
            format: LogFormat::Text,
            with_target: true,
            with_thread_ids: false,
        }
    }
}

impl TracingConfig {
    fn env_filter(&self) -> Result<EnvFilter, TracerError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => {
                EnvFilter::try_new(&self.filter).map_err(|e| TracerError::Filter(e.to_string()))
            }
        }
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracerError> {
    if !config.enabled {
        return Ok(());
    }

    let env_filter = config.env_filter()?;

    let installed = match config.format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
    };
    installed.map_err(|e| TracerError::Init(e.to_string()))
}

/// Initialize test logging (safe to call from every test).
pub fn init_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,secretline_secrets=debug")),
        )
        .with_test_writer()
        .try_init();
}
