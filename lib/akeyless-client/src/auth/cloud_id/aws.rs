use crate::AkeylessError;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4::SigningParams;
use aws_smithy_runtime_api::client::identity::Identity;
use base64::prelude::*;
use std::collections::BTreeMap;
use std::time::SystemTime;

// Signed STS GetCallerIdentity request, handed to the vault which replays it.

const STS_URL: &str = "https://sts.amazonaws.com/";
const STS_HOST: &str = "sts.amazonaws.com";
const STS_BODY: &str = "Action=GetCallerIdentity&Version=2011-06-15";
const STS_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const REGION: &str = "us-east-1";
const SERVICE: &str = "sts";

/// Credentials provider from the default AWS chain: env, profile, web identity
/// (IRSA), ECS and IMDS.
pub(super) async fn default_provider() -> Result<SharedCredentialsProvider, AkeylessError> {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    config
        .credentials_provider()
        .ok_or_else(|| AkeylessError::CloudIdentity("No AWS credentials found".to_string()))
}

pub(super) async fn cloud_id(
    provider: &SharedCredentialsProvider,
    time: SystemTime,
) -> Result<String, AkeylessError> {
    let credentials = provider
        .provide_credentials()
        .await
        .map_err(|e| AkeylessError::CloudIdentity(format!("aws credentials: {}", e)))?;

    let headers = signed_headers(&credentials, time)?;
    let headers_json = serde_json::to_vec(&headers)
        .map_err(|e| AkeylessError::CloudIdentity(format!("aws headers: {}", e)))?;

    let data = BTreeMap::from([
        ("sts_request_method", "POST".to_string()),
        ("sts_request_url", BASE64_STANDARD.encode(STS_URL)),
        ("sts_request_body", BASE64_STANDARD.encode(STS_BODY)),
        ("sts_request_headers", BASE64_STANDARD.encode(headers_json)),
    ]);
    let dump = serde_json::to_vec(&data)
        .map_err(|e| AkeylessError::CloudIdentity(format!("aws request: {}", e)))?;

    Ok(BASE64_STANDARD.encode(dump))
}

/// SigV4 headers for the STS request, keyed the way Go's `http.Header` marshals.
fn signed_headers(
    credentials: &Credentials,
    time: SystemTime,
) -> Result<BTreeMap<String, Vec<String>>, AkeylessError> {
    let identity = Identity::new(credentials.clone(), credentials.expiry());
    let params = SigningParams::builder()
        .identity(&identity)
        .region(REGION)
        .name(SERVICE)
        .time(time)
        .settings(SigningSettings::default())
        .build()
        .map_err(sign_error)?;

    let base = [("content-type", STS_CONTENT_TYPE), ("host", STS_HOST)];
    let request = SignableRequest::new(
        "POST",
        STS_URL,
        base.iter().copied(),
        SignableBody::Bytes(STS_BODY.as_bytes()),
    )
    .map_err(sign_error)?;

    let (instructions, _) = sign(request, &params.into())
        .map_err(sign_error)?
        .into_parts();

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in base {
        headers.insert(canonical_header_key(name), vec![value.to_string()]);
    }
    for (name, value) in instructions.headers() {
        headers
            .entry(canonical_header_key(name))
            .or_default()
            .push(value.to_string());
    }
    Ok(headers)
}

fn sign_error(e: impl std::fmt::Display) -> AkeylessError {
    AkeylessError::CloudIdentity(format!("aws sigv4: {}", e))
}

/// `x-amz-date` -> `X-Amz-Date`
fn canonical_header_key(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    // 2024-01-02T03:04:05Z
    fn fixed_time() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_704_164_645)
    }

    fn credentials(session_token: Option<&str>) -> Credentials {
        Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            session_token.map(str::to_string),
            None,
            "test",
        )
    }

    #[test]
    fn test_signature_matches_reference() {
        let headers = signed_headers(&credentials(None), fixed_time()).unwrap();
        assert_eq!(
            headers["Authorization"][0],
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240102/us-east-1/sts/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=ef6e2c21abc34d331e927bc6b779f830ed1a60d57ccc4fddb0ad4ac673bf7809"
        );
        assert_eq!(headers["X-Amz-Date"][0], "20240102T030405Z");
        assert_eq!(headers["Content-Type"][0], STS_CONTENT_TYPE);
        assert!(!headers.contains_key("X-Amz-Security-Token"));
    }

    #[test]
    fn test_session_token_is_signed() {
        let headers = signed_headers(&credentials(Some("session-token")), fixed_time()).unwrap();
        assert!(
            headers["Authorization"][0]
                .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-security-token")
        );
        assert_eq!(headers["X-Amz-Security-Token"][0], "session-token");
    }

    #[tokio::test]
    async fn test_cloud_id_layout() {
        let provider = SharedCredentialsProvider::new(credentials(None));
        let id = cloud_id(&provider, fixed_time()).await.unwrap();
        let decoded = BASE64_STANDARD.decode(id).unwrap();
        let data: BTreeMap<String, String> = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(data["sts_request_method"], "POST");
        assert_eq!(
            BASE64_STANDARD.decode(&data["sts_request_url"]).unwrap(),
            STS_URL.as_bytes()
        );
        assert_eq!(
            BASE64_STANDARD.decode(&data["sts_request_body"]).unwrap(),
            STS_BODY.as_bytes()
        );

        let headers: BTreeMap<String, Vec<String>> =
            serde_json::from_slice(&BASE64_STANDARD.decode(&data["sts_request_headers"]).unwrap())
                .unwrap();
        assert_eq!(headers["Host"], vec![STS_HOST.to_string()]);
        assert!(headers["Authorization"][0].starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    }

    /// Session credentials as issued by web identity or an assumed role,
    /// never visible through `AWS_ACCESS_KEY_ID`.
    #[derive(Debug)]
    struct WebIdentity(Option<Credentials>);

    impl ProvideCredentials for WebIdentity {
        fn provide_credentials<'a>(
            &'a self,
        ) -> aws_credential_types::provider::future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            let result = self.0.clone().ok_or_else(|| {
                aws_credential_types::provider::error::CredentialsError::not_loaded(
                    "no web identity token",
                )
            });
            aws_credential_types::provider::future::ProvideCredentials::ready(result)
        }
    }

    #[tokio::test]
    async fn test_cloud_id_from_web_identity_provider() {
        let provider = SharedCredentialsProvider::new(WebIdentity(Some(Credentials::new(
            "ASIAROLE",
            "role-secret",
            Some("irsa-session".to_string()),
            None,
            "web-identity",
        ))));

        let id = cloud_id(&provider, fixed_time()).await.unwrap();
        let data: BTreeMap<String, String> =
            serde_json::from_slice(&BASE64_STANDARD.decode(id).unwrap()).unwrap();
        let headers: BTreeMap<String, Vec<String>> =
            serde_json::from_slice(&BASE64_STANDARD.decode(&data["sts_request_headers"]).unwrap())
                .unwrap();

        assert_eq!(headers["X-Amz-Security-Token"], vec!["irsa-session".to_string()]);
        assert!(headers["Authorization"][0].contains("Credential=ASIAROLE/20240102/us-east-1/sts/"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_cloud_identity_error() {
        let provider = SharedCredentialsProvider::new(WebIdentity(None));

        let err = cloud_id(&provider, fixed_time()).await.unwrap_err();
        assert!(matches!(err, AkeylessError::CloudIdentity(_)));
        assert!(err.to_string().contains("aws credentials"));
    }

    #[test]
    fn test_canonical_header_key() {
        assert_eq!(canonical_header_key("x-amz-security-token"), "X-Amz-Security-Token");
        assert_eq!(canonical_header_key("authorization"), "Authorization");
    }
}
