use crate::cluster::ClusterApi;
use crate::manifests::{SecretStore, provider_secret};
use crate::{FixtureError, ProviderConfig};
use akeyless_client::{AkeylessApi, Authenticator, CreateSecret, DeleteItem};
use std::sync::Arc;

/// Akeyless side of the external-secrets e2e suite.
///
/// `before_each` wires a namespace to the vault; `create_secret` and
/// `delete_secret` seed and clean vault items for a test case. Every call
/// authenticates again, so no token outlives the operation that fetched it.
pub struct AkeylessProvider {
    namespace: String,
    config: ProviderConfig,
    authenticator: Authenticator,
    api: Arc<dyn AkeylessApi>,
    cluster: Arc<dyn ClusterApi>,
}

impl AkeylessProvider {
    pub fn new(
        namespace: impl Into<String>,
        config: ProviderConfig,
        api: Arc<dyn AkeylessApi>,
        cluster: Arc<dyn ClusterApi>,
    ) -> Result<Self, FixtureError> {
        let authenticator = Authenticator::new(config.credentials()?);

        Ok(Self {
            namespace: namespace.into(),
            config,
            authenticator,
            api,
            cluster,
        })
    }

    /// Replace the authenticator, e.g. to point k8s auth at another JWT file.
    pub fn with_authenticator(mut self, authenticator: Authenticator) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create the credential secret, then the secret store reading from it.
    pub async fn before_each(&self) -> Result<(), FixtureError> {
        let secret = provider_secret(&self.namespace, &self.config);
        self.cluster.create_secret(&secret).await?;

        let store = SecretStore::akeyless(&self.namespace, self.config.api_url.clone());
        self.cluster.create_secret_store(&store).await?;

        tracing::info!(namespace = %self.namespace, "Akeyless secret store created");
        Ok(())
    }

    pub async fn get_token(&self) -> Result<String, FixtureError> {
        Ok(self.authenticator.authenticate(self.api.as_ref()).await?)
    }

    pub async fn create_secret(&self, key: &str, value: &str) -> Result<(), FixtureError> {
        let token = self.get_token().await?;

        self.api
            .create_secret(&CreateSecret {
                name: key.to_string(),
                value: value.to_string(),
                token,
            })
            .await?;

        tracing::debug!(key, "Vault secret created");
        Ok(())
    }

    pub async fn delete_secret(&self, key: &str) -> Result<(), FixtureError> {
        let token = self.get_token().await?;

        self.api
            .delete_item(&DeleteItem {
                name: key.to_string(),
                token,
            })
            .await?;

        tracing::debug!(key, "Vault secret deleted");
        Ok(())
    }
}
