mod cloud_id;
mod kubernetes;
mod strategy;

pub use cloud_id::CloudIdResolver;
pub use kubernetes::DEFAULT_JWT_PATH;
pub use strategy::{AuthStrategy, CloudProvider, Credentials};

use crate::{AkeylessApi, AkeylessError, AuthRequest};
use std::path::PathBuf;

/// Turns [`Credentials`] into a vault token.
///
/// Holds no state besides its configuration: every call to
/// [`authenticate`](Authenticator::authenticate) is a fresh round trip.
pub struct Authenticator {
    credentials: Credentials,
    jwt_path: PathBuf,
    cloud_id: CloudIdResolver,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            jwt_path: PathBuf::from(DEFAULT_JWT_PATH),
            cloud_id: CloudIdResolver::new(),
        }
    }

    pub fn with_jwt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.jwt_path = path.into();
        self
    }

    pub fn with_cloud_id_resolver(mut self, resolver: CloudIdResolver) -> Self {
        self.cloud_id = resolver;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build the `/auth` body for the configured strategy.
    pub async fn auth_request(&self) -> Result<AuthRequest, AkeylessError> {
        let mut request = AuthRequest {
            access_id: self.credentials.access_id().to_string(),
            ..Default::default()
        };

        match self.credentials.strategy() {
            AuthStrategy::ApiKey { access_key } => {
                request.access_key = Some(access_key.clone());
            }
            AuthStrategy::Kubernetes { auth_config_name } => {
                let jwt = kubernetes::read_service_account_jwt(&self.jwt_path)?;
                request.access_type = Some(strategy::K8S.to_string());
                request.k8s_service_account_token = Some(jwt);
                request.k8s_auth_config_name = Some(auth_config_name.clone());
            }
            AuthStrategy::CloudIdentity(provider) => {
                let cloud_id = self.cloud_id.cloud_id(provider).await?;
                request.access_type = Some(provider.tag().to_string());
                request.cloud_id = Some(cloud_id);
            }
        }

        Ok(request)
    }

    pub async fn authenticate<A>(&self, api: &A) -> Result<String, AkeylessError>
    where
        A: AkeylessApi + ?Sized,
    {
        let request = self.auth_request().await?;

        tracing::debug!(
            access_id = %request.access_id,
            access_type = self.credentials.strategy().tag(),
            "Authenticating with Akeyless"
        );

        let output = api.auth(&request).await?;
        Ok(output.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthOutput, CreateSecret, DeleteItem};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        requests: Mutex<Vec<AuthRequest>>,
    }

    #[async_trait]
    impl AkeylessApi for RecordingApi {
        async fn auth(&self, request: &AuthRequest) -> Result<AuthOutput, AkeylessError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            Ok(AuthOutput {
                token: format!("t-{}", requests.len()),
            })
        }

        async fn create_secret(&self, _request: &CreateSecret) -> Result<(), AkeylessError> {
            unreachable!()
        }

        async fn delete_item(&self, _request: &DeleteItem) -> Result<(), AkeylessError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn test_api_key_sent_verbatim() {
        let api = RecordingApi::default();
        let auth =
            Authenticator::new(Credentials::parse("p-1", "api_key", " k3y with spaces ").unwrap());

        let token = auth.authenticate(&api).await.unwrap();
        assert_eq!(token, "t-1");

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].access_key.as_deref(), Some(" k3y with spaces "));
        assert_eq!(requests[0].access_type, None);
        assert_eq!(requests[0].cloud_id, None);
    }

    #[tokio::test]
    async fn test_no_token_caching() {
        let api = RecordingApi::default();
        let auth = Authenticator::new(Credentials::parse("p-1", "api_key", "key").unwrap());

        assert_eq!(auth.authenticate(&api).await.unwrap(), "t-1");
        assert_eq!(auth.authenticate(&api).await.unwrap(), "t-2");
        assert_eq!(api.requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_jwt_skips_network() {
        let api = RecordingApi::default();
        let auth = Authenticator::new(Credentials::parse("p-1", "k8s", "conf").unwrap())
            .with_jwt_path("/nonexistent/token");

        let err = auth.authenticate(&api).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/token"));
        assert!(api.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_aws_ignores_param() {
        let auth = Authenticator::new(Credentials::parse("p-1", "aws_iam", "ignored").unwrap())
            .with_cloud_id_resolver(
                CloudIdResolver::new().with_aws_credentials(aws_credential_types::Credentials::new(
                    "AKID", "secret", None, None, "test",
                )),
            );

        let request = auth.auth_request().await.unwrap();
        assert_eq!(request.access_type.as_deref(), Some("aws_iam"));
        assert!(request.cloud_id.is_some());
        assert!(request.access_key.is_none());
        assert!(request.k8s_auth_config_name.is_none());
    }
}
