use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AkeylessError {
    #[error("Unable to determine provider: {0}")]
    UnknownProvider(String),

    #[error("Access id must not be empty")]
    EmptyAccessId,

    #[error("failed to read JWT with Kubernetes Auth from {}: {source}", .path.display())]
    ServiceAccountToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Require Cloud ID: {0}")]
    CloudIdentity(String),

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}: {body}")]
    Api {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("{context}: invalid response ({source}): {body}")]
    InvalidResponse {
        context: &'static str,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AkeylessError {
    /// Strategy or credential values that can never authenticate.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownProvider(_) | Self::EmptyAccessId)
    }
}

/// Turns a non-2xx vault response into [`AkeylessError::Api`] carrying the raw body.
pub(crate) async fn check_status(
    context: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, AkeylessError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = body_text(context, response.text().await);
    tracing::warn!(status, "{}", context);
    Err(AkeylessError::Api {
        context,
        status,
        body,
    })
}

/// Body of an error response; a failed read is logged and named in its place.
pub(crate) fn body_text(context: &'static str, body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "{}: response body unreadable", context);
            format!("<unreadable response body: {}>", e)
        }
    }
}
