//! AWS SDK configuration and session setup.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use secretline_core::{AwsProvider, Error, Result};
use tracing::debug;

const BACKEND: &str = "AWS";

/// Load SDK configuration for `provider` and make sure it yields credentials.
///
/// An empty region or profile falls back to the SDK default chain.
pub async fn load_sdk_config(provider: &AwsProvider) -> Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if !provider.region.is_empty() {
        loader = loader.region(Region::new(provider.region.clone()));
    }
    if !provider.profile.is_empty() {
        loader = loader.profile_name(&provider.profile);
    }
    if let Some(endpoint) = &provider.endpoint {
        debug!(endpoint = %endpoint, "Using Secrets Manager endpoint override");
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;
    verify_credentials(&config).await?;
    Ok(config)
}

/// Resolve credentials once so a broken profile fails at construction
/// rather than on the first secret request.
async fn verify_credentials(config: &SdkConfig) -> Result<()> {
    let credentials = config
        .credentials_provider()
        .ok_or_else(|| Error::session(BACKEND, "no credentials provider configured"))?;

    credentials
        .provide_credentials()
        .await
        .map_err(|e| Error::session(BACKEND, e))?;

    debug!("AWS credentials resolved");
    Ok(())
}
