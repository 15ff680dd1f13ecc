#![warn(rust_2018_idioms)]

use akeyless_client::Authenticator;
use akeyless_e2e::{AkeylessProvider, KubeClient, ProviderConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Authenticate with the `AKEYLESS_*` credentials and print the token.
///
/// With a namespace argument the credential secret and secret store are
/// created there first, using the current kube context.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ProviderConfig::from_env()?;
    let client = config.akeyless_client()?;

    let token = match std::env::args().nth(1) {
        Some(namespace) => {
            let cluster = KubeClient::try_default().await?;
            let provider =
                AkeylessProvider::new(namespace, config, Arc::new(client), Arc::new(cluster))?;

            provider.before_each().await?;
            tracing::info!(namespace = provider.namespace(), "Requesting Akeyless token");
            provider.get_token().await?
        }
        None => {
            let authenticator = Authenticator::new(config.credentials()?);
            tracing::info!(access_type = %config.access_type, "Requesting Akeyless token");
            authenticator.authenticate(&client).await?
        }
    };

    println!("{}", token);
    Ok(())
}
