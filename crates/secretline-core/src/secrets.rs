//! Secret store spec and reference types.

use crate::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Marker prefix selecting an explicit version id instead of a version stage.
pub const VERSION_ID_PREFIX: &str = "uuid/";

/// Identifies one secret value request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExternalSecretRef {
    /// Name of the secret in the backend.
    pub name: String,
    /// Dotted path into a JSON structured secret.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub property: String,
    /// Version stage, or `uuid/<version-id>` for an explicit version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl ExternalSecretRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Spec handed to a secret store provider when constructing a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecretStoreSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderSpec>,
}

impl SecretStoreSpec {
    pub fn new(provider: ProviderSpec) -> Self {
        Self {
            provider: Some(provider),
        }
    }
}

/// Backend selection. Exactly one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProviderSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureKvProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alicloud: Option<AlicloudProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onpremises: Option<OnPremisesProvider>,
}

impl ProviderSpec {
    pub fn aws(provider: AwsProvider) -> Self {
        Self {
            aws: Some(provider),
            ..Default::default()
        }
    }

    pub fn vault(provider: VaultProvider) -> Self {
        Self {
            vault: Some(provider),
            ..Default::default()
        }
    }

    pub fn azure(provider: AzureKvProvider) -> Self {
        Self {
            azure: Some(provider),
            ..Default::default()
        }
    }

    pub fn alicloud(provider: AlicloudProvider) -> Self {
        Self {
            alicloud: Some(provider),
            ..Default::default()
        }
    }

    pub fn onpremises(provider: OnPremisesProvider) -> Self {
        Self {
            onpremises: Some(provider),
            ..Default::default()
        }
    }

    /// Determine which backend this spec selects.
    ///
    /// Fails when no backend or more than one backend is set, or when an
    /// on-premises backend has no name to be keyed by.
    pub fn kind(&self) -> Result<ProviderKind> {
        let mut kinds = Vec::with_capacity(1);
        if self.aws.is_some() {
            kinds.push(ProviderKind::Aws);
        }
        if self.vault.is_some() {
            kinds.push(ProviderKind::Vault);
        }
        if self.azure.is_some() {
            kinds.push(ProviderKind::Azure);
        }
        if self.alicloud.is_some() {
            kinds.push(ProviderKind::Alicloud);
        }
        if let Some(onpremises) = &self.onpremises {
            kinds.push(ProviderKind::OnPremises(onpremises.name.clone()));
        }

        if kinds.len() != 1 {
            return Err(Error::InvalidProviderSpec { found: kinds.len() });
        }
        match kinds.remove(0) {
            ProviderKind::OnPremises(name) if name.is_empty() => {
                Err(Error::UnnamedOnPremisesProvider)
            }
            kind => Ok(kind),
        }
    }
}

/// Discriminated backend kind derived from a [`ProviderSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Aws,
    Vault,
    Azure,
    Alicloud,
    /// Self-hosted backends are keyed by their own name.
    OnPremises(String),
}

impl ProviderKind {
    /// Registry key for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aws => "aws",
            Self::Vault => "vault",
            Self::Azure => "azure",
            Self::Alicloud => "alicloud",
            Self::OnPremises(name) => name,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AWS Secrets Manager connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AwsProvider {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    /// Shared config profile used to resolve credentials.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub profile: String,
    /// Endpoint override, e.g. for a local emulator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VaultProvider {
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub version: VaultKvStoreVersion,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum VaultKvStoreVersion {
    V1,
    #[default]
    V2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AzureKvProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AlicloudProvider {
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OnPremisesProvider {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl OnPremisesProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }
}
