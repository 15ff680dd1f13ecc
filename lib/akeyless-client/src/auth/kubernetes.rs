use crate::AkeylessError;
use base64::prelude::*;
use std::path::Path;

pub const DEFAULT_JWT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

/// Read the service-account JWT, trim it and base64 it for `k8s-service-account-token`.
pub(crate) fn read_service_account_jwt(path: &Path) -> Result<String, AkeylessError> {
    std::fs::read(path)
        .map(|bytes| BASE64_STANDARD.encode(bytes.trim_ascii()))
        .map_err(|source| AkeylessError::ServiceAccountToken {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_jwt_trims_and_encodes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"  raw-token-value\n").unwrap();

        let jwt = read_service_account_jwt(file.path()).unwrap();
        assert_eq!(jwt, BASE64_STANDARD.encode("raw-token-value"));
        assert_eq!(jwt, "cmF3LXRva2VuLXZhbHVl");
    }

    #[test]
    fn test_read_jwt_keeps_non_utf8_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b" tok\xffen\n").unwrap();

        assert_eq!(read_service_account_jwt(file.path()).unwrap(), "dG9r/2Vu");
    }

    #[test]
    fn test_read_jwt_missing_file() {
        let result = read_service_account_jwt(Path::new("/nonexistent/path"));
        match result {
            Err(AkeylessError::ServiceAccountToken { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/path"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
