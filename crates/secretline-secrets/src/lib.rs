//! Pluggable secret retrieval for secretline.
//!
//! A [`ProviderRegistry`] maps provider kinds to [`SecretStoreProvider`]
//! factories; a factory turns a [`secretline_core::SecretStoreSpec`] into a
//! live [`SecretStore`]. Stores fetch raw payloads from their backend and use
//! the [`resolver`] to extract properties from JSON structured secrets.

pub mod providers;
pub mod registry;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use providers::aws::{AwsSecretStoreProvider, SecretsManagerStore};
pub use registry::ProviderRegistry;
pub use resolver::{PropertyValue, resolve};
pub use store::{SecretStore, SecretStoreProvider};
