use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of the `/auth` call. Only the fields of the active strategy are set.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthRequest {
    pub access_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k8s_service_account_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k8s_auth_config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("access_id", &self.access_id)
            .field("has_access_key", &self.access_key.is_some())
            .field("access_type", &self.access_type)
            .field(
                "has_k8s_service_account_token",
                &self.k8s_service_account_token.is_some(),
            )
            .field("k8s_auth_config_name", &self.k8s_auth_config_name)
            .field("has_cloud_id", &self.cloud_id.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthOutput {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateSecret {
    pub name: String,
    pub value: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteItem {
    pub name: String,
    pub token: String,
}
