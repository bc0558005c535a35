//! In-memory fakes shared by unit tests.

use crate::store::{SecretStore, SecretStoreProvider};
use async_trait::async_trait;
use secretline_core::{ExternalSecretRef, Result, SecretStoreSpec};
use tokio_util::sync::CancellationToken;

/// Store that answers every request with `NOOP`.
#[derive(Debug, Default)]
pub struct FakeSecretStore;

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get_secret(
        &self,
        _ctx: &CancellationToken,
        _reference: &ExternalSecretRef,
    ) -> Result<Option<Vec<u8>>> {
        Ok(Some(b"NOOP".to_vec()))
    }

    async fn set_secret(
        &self,
        _ctx: &CancellationToken,
        _reference: &ExternalSecretRef,
        _value: &[u8],
    ) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeSecretStoreProvider;

#[async_trait]
impl SecretStoreProvider for FakeSecretStoreProvider {
    async fn new_secret_store(&self, _spec: &SecretStoreSpec) -> Result<Box<dyn SecretStore>> {
        Ok(Box::new(FakeSecretStore))
    }

    fn name(&self) -> &str {
        "fake"
    }
}
