use crate::FixtureError;
use akeyless_client::{AkeylessClient, Credentials};
use std::fmt;

pub const ACCESS_ID_ENV: &str = "AKEYLESS_ACCESS_ID";
pub const ACCESS_TYPE_ENV: &str = "AKEYLESS_ACCESS_TYPE";
pub const ACCESS_TYPE_PARAM_ENV: &str = "AKEYLESS_ACCESS_TYPE_PARAM";
pub const API_URL_ENV: &str = "AKEYLESS_API_URL";

/// Raw provider credentials as handed to the suite
#[derive(Clone)]
pub struct ProviderConfig {
    pub access_id: String,
    pub access_type: String,
    pub access_type_param: String,
    pub api_url: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("access_id", &self.access_id)
            .field("access_type", &self.access_type)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    pub fn new(
        access_id: impl Into<String>,
        access_type: impl Into<String>,
        access_type_param: impl Into<String>,
    ) -> Self {
        Self {
            access_id: access_id.into(),
            access_type: access_type.into(),
            access_type_param: access_type_param.into(),
            api_url: None,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn from_env() -> Result<Self, FixtureError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FixtureError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(FixtureError::MissingEnv(name))
        };

        let config = Self::new(
            required(ACCESS_ID_ENV)?,
            required(ACCESS_TYPE_ENV)?,
            // aws_iam needs no parameter
            lookup(ACCESS_TYPE_PARAM_ENV).unwrap_or_default(),
        );

        Ok(match lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            Some(url) => config.with_api_url(url),
            None => config,
        })
    }

    /// Validate the access type and build the credentials used for `/auth`.
    pub fn credentials(&self) -> Result<Credentials, FixtureError> {
        Ok(Credentials::parse(
            self.access_id.clone(),
            &self.access_type,
            self.access_type_param.clone(),
        )?)
    }

    pub fn akeyless_client(&self) -> Result<AkeylessClient, FixtureError> {
        let mut builder = AkeylessClient::builder().application_name(env!("CARGO_PKG_NAME"));
        if let Some(ref url) = self.api_url {
            builder = builder.base_url(url.clone());
        }
        Ok(builder.build()?)
    }
}
