use super::metadata_body;
use crate::AkeylessError;
use base64::prelude::*;
use serde::Deserialize;

const API_VERSION: &str = "2018-02-01";
const RESOURCE: &str = "https://management.azure.com/";

#[derive(Deserialize)]
struct MsiToken {
    access_token: String,
}

pub(super) async fn cloud_id(
    http: &reqwest::Client,
    endpoint: &str,
    object_id: &str,
) -> Result<String, AkeylessError> {
    let mut query = vec![("api-version", API_VERSION), ("resource", RESOURCE)];
    if !object_id.is_empty() {
        query.push(("object_id", object_id));
    }

    let request = http.get(endpoint).query(&query).header("Metadata", "true");
    let body = metadata_body("azure", request).await?;

    let token: MsiToken = serde_json::from_str(&body)
        .map_err(|e| AkeylessError::CloudIdentity(format!("invalid azure token response: {}", e)))?;

    Ok(BASE64_STANDARD.encode(token.access_token))
}
