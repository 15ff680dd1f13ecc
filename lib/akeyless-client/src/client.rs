use crate::error::{AkeylessError, check_status};
use crate::models::{AuthOutput, AuthRequest, CreateSecret, DeleteItem};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_API_URL: &str = "https://api.akeyless.io";

const AUTH_FAILED: &str = "authentication failed";
const CREATE_SECRET_FAILED: &str = "create secret failed";
const DELETE_ITEM_FAILED: &str = "delete item failed";

/// The vault calls the e2e fixture needs
#[async_trait]
pub trait AkeylessApi: Send + Sync {
    async fn auth(&self, request: &AuthRequest) -> Result<AuthOutput, AkeylessError>;

    async fn create_secret(&self, request: &CreateSecret) -> Result<(), AkeylessError>;

    async fn delete_item(&self, request: &DeleteItem) -> Result<(), AkeylessError>;
}

pub struct AkeylessClientBuilder {
    base_url: Option<String>,
    application_name: Option<String>,
}

impl Default for AkeylessClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AkeylessClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            application_name: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    fn resolve_base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| std::env::var("AKEYLESS_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn build(self) -> Result<AkeylessClient, AkeylessError> {
        let base_url = self.resolve_base_url();

        let mut http = reqwest::Client::builder();
        if let Some(ref app_name) = self.application_name {
            http = http.user_agent(app_name.clone());
        }
        let http = http.build().map_err(|source| AkeylessError::Transport {
            context: "failed to build HTTP client",
            source,
        })?;

        Ok(AkeylessClient { base_url, http })
    }
}

/// HTTP client for the Akeyless REST API
pub struct AkeylessClient {
    base_url: String,
    http: reqwest::Client,
}

impl AkeylessClient {
    pub fn builder() -> AkeylessClientBuilder {
        AkeylessClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: &'static str,
    ) -> Result<reqwest::Response, AkeylessError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "Akeyless request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| AkeylessError::Transport { context, source })?;

        check_status(context, response).await
    }
}

#[async_trait]
impl AkeylessApi for AkeylessClient {
    async fn auth(&self, request: &AuthRequest) -> Result<AuthOutput, AkeylessError> {
        let response = self.post_json("auth", request, AUTH_FAILED).await?;
        let body = response
            .text()
            .await
            .map_err(|source| AkeylessError::Transport {
                context: AUTH_FAILED,
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| AkeylessError::InvalidResponse {
            context: AUTH_FAILED,
            body,
            source,
        })
    }

    async fn create_secret(&self, request: &CreateSecret) -> Result<(), AkeylessError> {
        self.post_json("create-secret", request, CREATE_SECRET_FAILED)
            .await?;
        Ok(())
    }

    async fn delete_item(&self, request: &DeleteItem) -> Result<(), AkeylessError> {
        self.post_json("delete-item", request, DELETE_ITEM_FAILED)
            .await?;
        Ok(())
    }
}
