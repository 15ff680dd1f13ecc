pub mod cluster;
pub mod config;
pub mod error;
pub mod manifests;
pub mod provider;

pub use cluster::{ClusterApi, KubeClient};
pub use config::ProviderConfig;
pub use error::FixtureError;
pub use manifests::{SecretStore, SecretStoreSpec, provider_secret};
pub use provider::AkeylessProvider;
