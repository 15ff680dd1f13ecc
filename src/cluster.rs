use crate::FixtureError;
use crate::manifests::SecretStore;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, PostParams};
use kube::{Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Control-plane calls made by the fixture
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn create_secret(&self, secret: &Secret) -> Result<(), FixtureError>;

    async fn create_secret_store(&self, store: &SecretStore) -> Result<(), FixtureError>;
}

/// [`ClusterApi`] backed by a `kube` client
#[derive(Clone)]
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// In-cluster service account, else the local kubeconfig.
    pub async fn try_default() -> Result<Self, FixtureError> {
        Ok(Self::new(kube::Client::try_default().await?))
    }

    pub fn from_config(config: kube::Config) -> Result<Self, FixtureError> {
        Ok(Self::new(kube::Client::try_from(config)?))
    }

    async fn create<K>(&self, kind: &'static str, object: &K) -> Result<(), FixtureError>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope>
            + Clone
            + Debug
            + Serialize
            + DeserializeOwned,
        K::DynamicType: Default,
    {
        let name = object.name_any();
        let namespace = object.namespace().ok_or_else(|| {
            FixtureError::ClusterRequest(format!("{} {} has no namespace", kind, name))
        })?;
        tracing::debug!(kind, %name, %namespace, "Creating cluster object");

        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);
        match api.create(&PostParams::default(), object).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(e)) => {
                tracing::warn!(status = e.code, kind, %name, "Cluster rejected object");
                Err(FixtureError::Cluster {
                    kind,
                    name,
                    status: e.code,
                    message: e.message,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ClusterApi for KubeClient {
    async fn create_secret(&self, secret: &Secret) -> Result<(), FixtureError> {
        self.create("Secret", secret).await
    }

    async fn create_secret_store(&self, store: &SecretStore) -> Result<(), FixtureError> {
        self.create("SecretStore", store).await
    }
}
