//! Loading secret store specs from YAML/JSON configuration.

use crate::secrets::{ExternalSecretRef, SecretStoreSpec};
use crate::Result;
use schemars::schema::RootSchema;
use std::path::Path;

impl SecretStoreSpec {
    /// Parse a spec from YAML (JSON is accepted too, being a YAML subset).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a spec from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Render the spec back to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// JSON schema describing the spec document.
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(SecretStoreSpec)
    }
}

impl ExternalSecretRef {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
