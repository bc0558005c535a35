//! Secret store traits implemented by every backend.

use async_trait::async_trait;
use secretline_core::{ExternalSecretRef, Result, SecretStoreSpec};
use tokio_util::sync::CancellationToken;

/// A live handle on one secret backend.
///
/// Stores are shared between callers, so implementations must be safe for
/// concurrent use. Every call races `ctx`; once it is cancelled the pending
/// backend request is dropped and [`secretline_core::Error::Cancelled`] is
/// returned.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    /// Fetch the value addressed by `reference`.
    ///
    /// A secret that does not exist in the backend yields `Ok(None)`.
    async fn get_secret(
        &self,
        ctx: &CancellationToken,
        reference: &ExternalSecretRef,
    ) -> Result<Option<Vec<u8>>>;

    /// Write `value` to the secret addressed by `reference`.
    async fn set_secret(
        &self,
        ctx: &CancellationToken,
        reference: &ExternalSecretRef,
        value: &[u8],
    ) -> Result<()>;
}

/// Factory for a [`SecretStore`] of one backend kind.
#[async_trait]
pub trait SecretStoreProvider: Send + Sync {
    /// Build a store for `spec`, establishing the backend session.
    async fn new_secret_store(&self, spec: &SecretStoreSpec) -> Result<Box<dyn SecretStore>>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
