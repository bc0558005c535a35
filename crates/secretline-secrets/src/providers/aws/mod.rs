//! # AWS Secrets Manager
//!
//! Read-only secret store backed by AWS Secrets Manager.
//!
//! - references resolve to `GetSecretValue` calls; the version selects a
//!   stage label (default `AWSCURRENT`) or, with a `uuid/` prefix, a version id
//! - a missing secret is reported as no value rather than an error
//! - a property path extracts one value from a JSON secret

pub mod auth;
pub mod client;

pub use client::{
    DEFAULT_VERSION_STAGE, FetchError, GetSecretValueRequest, SecretPayload, SecretsManagerApi,
    VersionSelector,
};

use crate::registry::ProviderRegistry;
use crate::resolver;
use crate::store::{SecretStore, SecretStoreProvider};
use async_trait::async_trait;
use secretline_core::{AwsProvider, Error, ExternalSecretRef, ProviderSpec, Result, SecretStoreSpec};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Backend name reported in errors.
pub const BACKEND_NAME: &str = "AWS Secret Manager";

/// Register the AWS provider under the `aws` kind.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(
        Arc::new(AwsSecretStoreProvider),
        &ProviderSpec::aws(AwsProvider::default()),
    );
}

/// Factory for [`SecretsManagerStore`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsSecretStoreProvider;

#[async_trait]
impl SecretStoreProvider for AwsSecretStoreProvider {
    async fn new_secret_store(&self, spec: &SecretStoreSpec) -> Result<Box<dyn SecretStore>> {
        let provider = spec.provider.as_ref().ok_or(Error::MissingProviderSpec)?;
        let aws = provider
            .aws
            .as_ref()
            .ok_or(Error::MissingBackendSpec { backend: "AWS" })?;

        let config = auth::load_sdk_config(aws).await?;
        debug!(region = %aws.region, profile = %aws.profile, "Created AWS Secrets Manager session");

        Ok(Box::new(SecretsManagerStore::new(
            aws_sdk_secretsmanager::Client::new(&config),
        )))
    }

    fn name(&self) -> &str {
        "aws-secrets-manager"
    }
}

/// Secret store reading from Secrets Manager through `C`.
#[derive(Debug, Clone)]
pub struct SecretsManagerStore<C = aws_sdk_secretsmanager::Client> {
    client: C,
}

impl<C: SecretsManagerApi> SecretsManagerStore<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: SecretsManagerApi + 'static> SecretStore for SecretsManagerStore<C> {
    async fn get_secret(
        &self,
        ctx: &CancellationToken,
        reference: &ExternalSecretRef,
    ) -> Result<Option<Vec<u8>>> {
        let request = GetSecretValueRequest::from_ref(reference);
        debug!(secret = %reference.name, version = ?request.version, "Fetching secret");

        let fetched = tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(Error::Cancelled),
            result = self.client.get_secret_value(&request) => result,
        };

        let payload = match fetched {
            Ok(payload) => payload,
            Err(FetchError::NotFound) => {
                debug!(secret = %reference.name, "Secret not found");
                return Ok(None);
            }
            Err(FetchError::Other(e)) => return Err(Error::Backend(e)),
        };

        extract_value(payload, reference).map(Some)
    }

    async fn set_secret(
        &self,
        _ctx: &CancellationToken,
        _reference: &ExternalSecretRef,
        _value: &[u8],
    ) -> Result<()> {
        Err(Error::NotImplemented {
            provider: BACKEND_NAME,
            method: "SetSecret",
        })
    }
}

/// Pick the bytes addressed by `reference` out of a fetched payload.
fn extract_value(payload: SecretPayload, reference: &ExternalSecretRef) -> Result<Vec<u8>> {
    if reference.property.is_empty() {
        return payload
            .string
            .map(String::into_bytes)
            .or(payload.binary)
            .ok_or_else(|| Error::NoSecretData {
                name: reference.name.clone(),
            });
    }

    let raw: &[u8] = match (&payload.string, &payload.binary) {
        (Some(string), _) => string.as_bytes(),
        (None, Some(binary)) => binary,
        (None, None) => &[],
    };

    resolver::resolve(raw, &reference.property)
        .map(resolver::PropertyValue::into_bytes)
        .ok_or_else(|| Error::PropertyNotFound {
            property: reference.property.clone(),
            name: reference.name.clone(),
        })
}
