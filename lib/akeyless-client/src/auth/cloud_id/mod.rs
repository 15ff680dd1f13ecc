//! Cloud identity helpers: each turns the local platform identity into the
//! opaque `cloud-id` string the vault accepts.

mod aws;
mod azure;
mod gcp;

use super::CloudProvider;
use crate::AkeylessError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use std::time::SystemTime;

const AZURE_MSI_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const GCP_METADATA_URL: &str = "http://metadata.google.internal/computeMetadata/v1";

/// Derives cloud ids; endpoints and the AWS credentials provider can be pinned for tests.
#[derive(Debug, Clone)]
pub struct CloudIdResolver {
    http: reqwest::Client,
    azure_msi_endpoint: String,
    gcp_metadata_url: String,
    aws_credentials: Option<SharedCredentialsProvider>,
}

impl Default for CloudIdResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudIdResolver {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            azure_msi_endpoint: AZURE_MSI_ENDPOINT.to_string(),
            gcp_metadata_url: GCP_METADATA_URL.to_string(),
            aws_credentials: None,
        }
    }

    pub fn with_azure_msi_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.azure_msi_endpoint = endpoint.into();
        self
    }

    pub fn with_gcp_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.gcp_metadata_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sign with this provider instead of the default AWS credential chain.
    pub fn with_aws_credentials(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.aws_credentials = Some(SharedCredentialsProvider::new(provider));
        self
    }

    pub async fn cloud_id(&self, provider: &CloudProvider) -> Result<String, AkeylessError> {
        tracing::debug!(provider = provider.tag(), "Deriving cloud id");
        match provider {
            CloudProvider::AzureAd { object_id } => {
                azure::cloud_id(&self.http, &self.azure_msi_endpoint, object_id).await
            }
            CloudProvider::AwsIam => {
                let provider = match &self.aws_credentials {
                    Some(provider) => provider.clone(),
                    None => aws::default_provider().await?,
                };
                aws::cloud_id(&provider, SystemTime::now()).await
            }
            CloudProvider::Gcp { audience } => {
                gcp::cloud_id(&self.http, &self.gcp_metadata_url, audience).await
            }
        }
    }
}

/// Shared error path for metadata endpoints: non-2xx becomes a cloud identity error.
async fn metadata_body(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<String, AkeylessError> {
    let response = request.send().await.map_err(|e| {
        AkeylessError::CloudIdentity(format!("{} metadata request failed: {}", provider, e))
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        AkeylessError::CloudIdentity(format!("{} metadata response unreadable: {}", provider, e))
    })?;

    if !status.is_success() {
        return Err(AkeylessError::CloudIdentity(format!(
            "{} metadata returned {}: {}",
            provider,
            status.as_u16(),
            body
        )));
    }

    Ok(body)
}
