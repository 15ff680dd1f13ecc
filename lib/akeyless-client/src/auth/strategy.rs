use crate::AkeylessError;
use std::fmt;

pub const API_KEY: &str = "api_key";
pub const K8S: &str = "k8s";
pub const AZURE_AD: &str = "azure_ad";
pub const AWS_IAM: &str = "aws_iam";
pub const GCP: &str = "gcp";

/// Cloud platform whose identity is presented as a `cloud-id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudProvider {
    /// Managed identity; an empty object id selects the system-assigned identity.
    AzureAd { object_id: String },
    AwsIam,
    /// Metadata identity token; an empty audience falls back to `akeyless.io`.
    Gcp { audience: String },
}

impl CloudProvider {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AzureAd { .. } => AZURE_AD,
            Self::AwsIam => AWS_IAM,
            Self::Gcp { .. } => GCP,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    ApiKey { access_key: String },
    Kubernetes { auth_config_name: String },
    CloudIdentity(CloudProvider),
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { .. } => f.debug_struct("ApiKey").finish_non_exhaustive(),
            Self::Kubernetes { auth_config_name } => f
                .debug_struct("Kubernetes")
                .field("auth_config_name", auth_config_name)
                .finish(),
            Self::CloudIdentity(provider) => f.debug_tuple("CloudIdentity").field(provider).finish(),
        }
    }
}

impl AuthStrategy {
    /// Select a strategy from its access type tag and the tag-specific parameter.
    ///
    /// `param` is the access key for `api_key`, the auth config name for `k8s`,
    /// the object id for `azure_ad` and the audience for `gcp`. `aws_iam`
    /// ignores it.
    pub fn parse(tag: &str, param: impl Into<String>) -> Result<Self, AkeylessError> {
        let param = param.into();
        match tag {
            API_KEY => Ok(Self::ApiKey { access_key: param }),
            K8S => Ok(Self::Kubernetes {
                auth_config_name: param,
            }),
            AZURE_AD => Ok(Self::CloudIdentity(CloudProvider::AzureAd { object_id: param })),
            AWS_IAM => Ok(Self::CloudIdentity(CloudProvider::AwsIam)),
            GCP => Ok(Self::CloudIdentity(CloudProvider::Gcp { audience: param })),
            other => Err(AkeylessError::UnknownProvider(other.to_string())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => API_KEY,
            Self::Kubernetes { .. } => K8S,
            Self::CloudIdentity(provider) => provider.tag(),
        }
    }
}

/// Access id plus the one strategy used with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    access_id: String,
    strategy: AuthStrategy,
}

impl Credentials {
    pub fn new(
        access_id: impl Into<String>,
        strategy: AuthStrategy,
    ) -> Result<Self, AkeylessError> {
        let access_id = access_id.into();
        if access_id.trim().is_empty() {
            return Err(AkeylessError::EmptyAccessId);
        }
        Ok(Self {
            access_id,
            strategy,
        })
    }

    pub fn parse(
        access_id: impl Into<String>,
        access_type: &str,
        access_type_param: impl Into<String>,
    ) -> Result<Self, AkeylessError> {
        Self::new(access_id, AuthStrategy::parse(access_type, access_type_param)?)
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(
            AuthStrategy::parse("api_key", "key").unwrap(),
            AuthStrategy::ApiKey {
                access_key: "key".to_string()
            }
        );
        assert_eq!(
            AuthStrategy::parse("k8s", "conf").unwrap(),
            AuthStrategy::Kubernetes {
                auth_config_name: "conf".to_string()
            }
        );
        assert_eq!(
            AuthStrategy::parse("aws_iam", "ignored").unwrap(),
            AuthStrategy::CloudIdentity(CloudProvider::AwsIam)
        );
        assert_eq!(AuthStrategy::parse("gcp", "aud").unwrap().tag(), "gcp");
        assert_eq!(AuthStrategy::parse("azure_ad", "").unwrap().tag(), "azure_ad");
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = AuthStrategy::parse("bogus", "x").unwrap_err();
        assert!(matches!(err, AkeylessError::UnknownProvider(ref tag) if tag == "bogus"));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(AuthStrategy::parse("API_KEY", "x").is_err());
    }

    #[test]
    fn test_credentials_reject_empty_access_id() {
        let err = Credentials::parse("  ", "api_key", "key").unwrap_err();
        assert!(matches!(err, AkeylessError::EmptyAccessId));
    }

    #[test]
    fn test_debug_hides_access_key() {
        let strategy = AuthStrategy::parse("api_key", "very-secret").unwrap();
        assert!(!format!("{:?}", strategy).contains("very-secret"));
    }
}
