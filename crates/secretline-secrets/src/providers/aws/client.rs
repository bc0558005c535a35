//! Secrets Manager API surface used by the store.

use async_trait::async_trait;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use secretline_core::{BoxError, ExternalSecretRef, VERSION_ID_PREFIX};
use thiserror::Error;

/// Version stage requested when a reference names no version.
pub const DEFAULT_VERSION_STAGE: &str = "AWSCURRENT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Explicit immutable version id.
    Id(String),
    /// Version stage label such as `AWSCURRENT` or `AWSPREVIOUS`.
    Stage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSecretValueRequest {
    pub secret_id: String,
    pub version: VersionSelector,
}

impl GetSecretValueRequest {
    pub fn from_ref(reference: &ExternalSecretRef) -> Self {
        let version = if reference.version.is_empty() {
            VersionSelector::Stage(DEFAULT_VERSION_STAGE.to_string())
        } else if let Some(id) = reference.version.strip_prefix(VERSION_ID_PREFIX) {
            VersionSelector::Id(id.to_string())
        } else {
            VersionSelector::Stage(reference.version.clone())
        };

        Self {
            secret_id: reference.name.clone(),
            version,
        }
    }
}

/// Raw secret value as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretPayload {
    pub string: Option<String>,
    pub binary: Option<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("secret not found")]
    NotFound,
    #[error(transparent)]
    Other(BoxError),
}

/// The single Secrets Manager operation the store relies on.
#[async_trait]
pub trait SecretsManagerApi: Send + Sync + std::fmt::Debug {
    async fn get_secret_value(
        &self,
        request: &GetSecretValueRequest,
    ) -> Result<SecretPayload, FetchError>;
}

#[async_trait]
impl SecretsManagerApi for aws_sdk_secretsmanager::Client {
    async fn get_secret_value(
        &self,
        request: &GetSecretValueRequest,
    ) -> Result<SecretPayload, FetchError> {
        let call = self.get_secret_value().secret_id(&request.secret_id);
        let call = match &request.version {
            VersionSelector::Id(id) => call.version_id(id),
            VersionSelector::Stage(stage) => call.version_stage(stage),
        };

        match call.send().await {
            Ok(output) => Ok(SecretPayload {
                string: output.secret_string().map(ToOwned::to_owned),
                binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
            }),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(GetSecretValueError::is_resource_not_found_exception) =>
            {
                Err(FetchError::NotFound)
            }
            Err(err) => Err(FetchError::Other(Box::new(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_version_uses_current_stage() {
        let request = GetSecretValueRequest::from_ref(&ExternalSecretRef::new("db"));
        assert_eq!(request.secret_id, "db");
        assert_eq!(
            request.version,
            VersionSelector::Stage("AWSCURRENT".to_string())
        );
    }

    #[test]
    fn test_uuid_prefix_selects_version_id() {
        let reference = ExternalSecretRef::new("db").with_version("uuid/abc123");
        let request = GetSecretValueRequest::from_ref(&reference);
        assert_eq!(request.version, VersionSelector::Id("abc123".to_string()));
    }

    #[test]
    fn test_other_version_is_stage_label() {
        let reference = ExternalSecretRef::new("db").with_version("AWSPREVIOUS");
        let request = GetSecretValueRequest::from_ref(&reference);
        assert_eq!(
            request.version,
            VersionSelector::Stage("AWSPREVIOUS".to_string())
        );
    }

    #[test]
    fn test_uuid_marker_must_be_a_prefix() {
        let reference = ExternalSecretRef::new("db").with_version("stage-uuid/1");
        let request = GetSecretValueRequest::from_ref(&reference);
        assert_eq!(
            request.version,
            VersionSelector::Stage("stage-uuid/1".to_string())
        );
    }
}
