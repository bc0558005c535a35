//! Error types for secretline.

use thiserror::Error;

/// Boxed error used to carry backend and session failures without losing
/// their concrete type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    // Provider spec errors
    #[error("secret stores must only have exactly one provider specified, found {found}")]
    InvalidProviderSpec { found: usize },

    #[error("on-premises provider spec is missing a name")]
    UnnamedOnPremisesProvider,

    #[error("store spec is missing provider")]
    MissingProviderSpec,

    #[error("invalid provider spec. Missing {backend} field in store provider spec")]
    MissingBackendSpec { backend: &'static str },

    #[error("failed to find registered secret store provider: {0}")]
    ProviderNotRegistered(String),

    // Session errors
    #[error("failed to create usable {backend} session: {source}")]
    Session {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    // Secret errors
    #[error("invalid secret data. no secret string nor binary for key: {name}")]
    NoSecretData { name: String },

    #[error("key {property} does not exist in secret {name}")]
    PropertyNotFound { property: String, name: String },

    #[error("method not implemented. secret provider: {provider}, method: {method}")]
    NotImplemented {
        provider: &'static str,
        method: &'static str,
    },

    #[error(transparent)]
    Backend(BoxError),

    #[error("secret request cancelled")]
    Cancelled,

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a backend failure, keeping it as the error source.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Error::Backend(err.into())
    }

    /// Wrap a session/authentication failure with backend context.
    pub fn session(backend: &'static str, err: impl Into<BoxError>) -> Self {
        Error::Session {
            backend,
            source: err.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}
