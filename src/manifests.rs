//! Cluster objects the fixture creates before each test.

use crate::ProviderConfig;
use k8s_openapi::api::core::v1::Secret;
use kube::CustomResource;
use kube::api::ObjectMeta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROVIDER_SECRET_NAME: &str = "provider-secret";
pub const ACCESS_ID_KEY: &str = "access-id";
pub const ACCESS_TYPE_KEY: &str = "access-type";
pub const ACCESS_TYPE_PARAM_KEY: &str = "access-type-param";

/// The credential secret the secret store reads its Akeyless auth from.
pub fn provider_secret(namespace: &str, config: &ProviderConfig) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(PROVIDER_SECRET_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        string_data: Some(BTreeMap::from([
            (ACCESS_ID_KEY.to_string(), config.access_id.clone()),
            (ACCESS_TYPE_KEY.to_string(), config.access_type.clone()),
            (
                ACCESS_TYPE_PARAM_KEY.to_string(),
                config.access_type_param.clone(),
            ),
        ])),
        ..Default::default()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SecretKeySelector {
    pub name: String,
    pub key: String,
}

impl SecretKeySelector {
    fn provider_key(key: &str) -> Self {
        Self {
            name: PROVIDER_SECRET_NAME.to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct AkeylessAuthSecretRef {
    #[serde(rename = "accessID")]
    pub access_id: SecretKeySelector,
    #[serde(rename = "accessType")]
    pub access_type: SecretKeySelector,
    #[serde(rename = "accessTypeParam")]
    pub access_type_param: SecretKeySelector,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AkeylessAuth {
    pub secret_ref: AkeylessAuthSecretRef,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct AkeylessStoreProvider {
    #[serde(
        rename = "akeylessGWApiURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gateway_api_url: Option<String>,
    pub auth: AkeylessAuth,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct SecretStoreProvider {
    pub akeyless: AkeylessStoreProvider,
}

/// `external-secrets.io` SecretStore backed by Akeyless
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "external-secrets.io",
    version = "v1alpha1",
    kind = "SecretStore",
    plural = "secretstores",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SecretStoreSpec {
    pub provider: SecretStoreProvider,
}

impl SecretStore {
    /// Store named after its namespace, reading every auth field from [`PROVIDER_SECRET_NAME`].
    pub fn akeyless(namespace: &str, gateway_api_url: Option<String>) -> Self {
        let spec = SecretStoreSpec {
            provider: SecretStoreProvider {
                akeyless: AkeylessStoreProvider {
                    gateway_api_url,
                    auth: AkeylessAuth {
                        secret_ref: AkeylessAuthSecretRef {
                            access_id: SecretKeySelector::provider_key(ACCESS_ID_KEY),
                            access_type: SecretKeySelector::provider_key(ACCESS_TYPE_KEY),
                            access_type_param: SecretKeySelector::provider_key(
                                ACCESS_TYPE_PARAM_KEY,
                            ),
                        },
                    },
                },
            },
        };

        let mut store = SecretStore::new(namespace, spec);
        store.metadata.namespace = Some(namespace.to_string());
        store
    }
}
