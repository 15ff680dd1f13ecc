use super::metadata_body;
use crate::AkeylessError;
use base64::prelude::*;

const DEFAULT_AUDIENCE: &str = "akeyless.io";

pub(super) async fn cloud_id(
    http: &reqwest::Client,
    metadata_url: &str,
    audience: &str,
) -> Result<String, AkeylessError> {
    let audience = if audience.is_empty() {
        DEFAULT_AUDIENCE
    } else {
        audience
    };
    let url = format!("{}/instance/service-accounts/default/identity", metadata_url);

    let request = http
        .get(&url)
        .query(&[("audience", audience), ("format", "full")])
        .header("Metadata-Flavor", "Google");
    let token = metadata_body("gcp", request).await?;

    Ok(BASE64_STANDARD.encode(token.trim()))
}
