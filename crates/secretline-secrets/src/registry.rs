//! Registry mapping provider kinds to secret store factories.

use crate::providers;
use crate::store::{SecretStore, SecretStoreProvider};
use secretline_core::{Error, ProviderSpec, Result, SecretStoreSpec};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of secret store providers keyed by provider kind.
///
/// Populated with `&mut self` while the process starts up, then shared
/// read-only (typically behind an `Arc`) for concurrent lookups.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SecretStoreProvider>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.registered_providers())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in backend registered.
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self::new();
        providers::register_builtin(&mut registry);
        registry
    }

    /// Register `provider` under the kind selected by `spec`.
    ///
    /// # Panics
    ///
    /// Panics when `spec` does not select exactly one backend. Registration
    /// happens while wiring up the process, where a bad spec is a bug.
    pub fn register(&mut self, provider: Arc<dyn SecretStoreProvider>, spec: &ProviderSpec) {
        if let Err(e) = self.try_register(provider, spec) {
            panic!("failed to register secret store provider: {e}");
        }
    }

    /// Register `provider` under the kind selected by `spec`, returning the
    /// validation error instead of panicking. Nothing is inserted on error.
    ///
    /// Registering a kind twice replaces the earlier provider.
    pub fn try_register(
        &mut self,
        provider: Arc<dyn SecretStoreProvider>,
        spec: &ProviderSpec,
    ) -> Result<()> {
        let kind = spec.kind()?;
        info!(kind = %kind, provider = %provider.name(), "Registering secret store provider");
        self.providers.insert(kind.as_str().to_string(), provider);
        Ok(())
    }

    /// Look up a provider by kind key (`aws`, `vault`, or an on-premises name).
    pub fn get_provider_by_name(&self, name: &str) -> Option<Arc<dyn SecretStoreProvider>> {
        self.providers.get(name).cloned()
    }

    /// Look up the provider for the kind selected by `spec`.
    pub fn get_provider(
        &self,
        spec: &ProviderSpec,
    ) -> Result<Option<Arc<dyn SecretStoreProvider>>> {
        let kind = spec.kind()?;
        Ok(self.get_provider_by_name(kind.as_str()))
    }

    /// Resolve the provider for `spec` and construct a store with it.
    pub async fn new_secret_store(&self, spec: &SecretStoreSpec) -> Result<Box<dyn SecretStore>> {
        let provider_spec = spec.provider.as_ref().ok_or(Error::MissingProviderSpec)?;
        let kind = provider_spec.kind()?;

        let provider = self
            .get_provider_by_name(kind.as_str())
            .ok_or_else(|| Error::ProviderNotRegistered(kind.to_string()))?;

        debug!(kind = %kind, "Constructing secret store");
        provider.new_secret_store(spec).await
    }

    /// Check if a provider is registered for `name`.
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered kind keys, sorted.
    pub fn registered_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSecretStoreProvider;
    use secretline_core::{AwsProvider, ExternalSecretRef, OnPremisesProvider, VaultProvider};
    use tokio_util::sync::CancellationToken;

    fn fake() -> Arc<dyn SecretStoreProvider> {
        Arc::new(FakeSecretStoreProvider::default())
    }

    #[test]
    fn test_register_valid_providers() {
        let mut registry = ProviderRegistry::new();

        registry.register(fake(), &ProviderSpec::aws(AwsProvider::default()));
        registry.register(
            fake(),
            &ProviderSpec::onpremises(OnPremisesProvider::new("customplatform")),
        );

        assert!(registry.get_provider_by_name("aws").is_some());
        assert!(registry.get_provider_by_name("customplatform").is_some());
        assert_eq!(registry.registered_providers(), vec!["aws", "customplatform"]);
    }

    #[test]
    #[should_panic(expected = "exactly one provider specified, found 0")]
    fn test_register_empty_spec_panics() {
        let mut registry = ProviderRegistry::new();
        registry.register(fake(), &ProviderSpec::default());
    }

    #[test]
    #[should_panic(expected = "exactly one provider specified, found 2")]
    fn test_register_ambiguous_spec_panics() {
        let mut registry = ProviderRegistry::new();
        let spec = ProviderSpec {
            aws: Some(AwsProvider::default()),
            vault: Some(VaultProvider::default()),
            ..Default::default()
        };
        registry.register(fake(), &spec);
    }

    #[test]
    fn test_try_register_invalid_spec_adds_nothing() {
        let mut registry = ProviderRegistry::new();
        let spec = ProviderSpec {
            aws: Some(AwsProvider::default()),
            onpremises: Some(OnPremisesProvider::new("internal")),
            ..Default::default()
        };

        let err = registry.try_register(fake(), &spec).unwrap_err();

        assert!(matches!(err, Error::InvalidProviderSpec { found: 2 }));
        assert!(registry.registered_providers().is_empty());
    }

    #[test]
    fn test_unknown_provider_lookup() {
        let registry = ProviderRegistry::new();
        assert!(registry.get_provider_by_name("aws").is_none());
        assert!(!registry.has_provider("aws"));
        assert!(registry.registered_providers().is_empty());
    }

    #[test]
    fn test_duplicate_registration_last_writer_wins() {
        let mut registry = ProviderRegistry::new();
        let first = fake();
        let second = fake();
        let spec = ProviderSpec::aws(AwsProvider::default());

        registry.register(first.clone(), &spec);
        registry.register(second.clone(), &spec);

        let found = registry.get_provider_by_name("aws").expect("registered");
        assert!(Arc::ptr_eq(&found, &second));
        assert!(!Arc::ptr_eq(&found, &first));
        assert_eq!(registry.registered_providers().len(), 1);
    }

    #[test]
    fn test_get_provider_validates_spec() {
        let mut registry = ProviderRegistry::new();
        registry.register(fake(), &ProviderSpec::aws(AwsProvider::default()));

        let found = registry
            .get_provider(&ProviderSpec::aws(AwsProvider::default()))
            .unwrap();
        assert!(found.is_some());

        let missing = registry
            .get_provider(&ProviderSpec::vault(VaultProvider::default()))
            .unwrap();
        assert!(missing.is_none());

        assert!(registry.get_provider(&ProviderSpec::default()).is_err());
    }

    #[test]
    fn test_builtin_providers() {
        let registry = ProviderRegistry::with_builtin_providers();
        assert!(registry.has_provider("aws"));
    }

    #[tokio::test]
    async fn test_new_secret_store_via_registry() {
        let mut registry = ProviderRegistry::new();
        registry.register(fake(), &ProviderSpec::aws(AwsProvider::default()));

        let spec = SecretStoreSpec::new(ProviderSpec::aws(AwsProvider::default()));
        let store = registry.new_secret_store(&spec).await.unwrap();
        let value = store
            .get_secret(&CancellationToken::new(), &ExternalSecretRef::new("any"))
            .await
            .unwrap();

        assert_eq!(value.as_deref(), Some(b"NOOP".as_slice()));
    }

    #[tokio::test]
    async fn test_new_secret_store_errors() {
        let registry = ProviderRegistry::new();

        let err = registry
            .new_secret_store(&SecretStoreSpec::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingProviderSpec));

        let spec = SecretStoreSpec::new(ProviderSpec::vault(VaultProvider::default()));
        let err = registry.new_secret_store(&spec).await.unwrap_err();
        assert!(matches!(err, Error::ProviderNotRegistered(ref kind) if kind == "vault"));
    }

    #[tokio::test]
    async fn test_concurrent_lookups() {
        let registry = Arc::new(ProviderRegistry::with_builtin_providers());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.get_provider_by_name("aws").is_some() })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
    }
}
