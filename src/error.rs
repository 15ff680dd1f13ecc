use akeyless_client::AkeylessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Akeyless(#[from] AkeylessError),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Cluster request failed: {0}")]
    ClusterRequest(String),

    #[error("Cluster rejected {kind} {name} ({status}): {message}")]
    Cluster {
        kind: &'static str,
        name: String,
        status: u16,
        message: String,
    },
}
