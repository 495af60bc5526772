//! Cloudflare error code mapping
//!
//! Codes: <https://developers.cloudflare.com/api/> (`errors[].code`).

use crate::error::ProviderError;
use crate::traits::{ApiErrorMapper, ApiFailure};

use super::CloudflareProvider;

/// 6003 bad request headers, 6103/6111 malformed key or bearer header,
/// 9103 unknown key/email pair, 10000 generic authentication error.
const AUTH_CODES: [i64; 5] = [6003, 6103, 6111, 9103, 10000];
/// Token lacks the scope for this resource.
const FORBIDDEN: i64 = 9109;
/// 1001 invalid zone identifier, 7000/7003 no route for the object id.
const MISSING_ZONE_CODES: [i64; 3] = [1001, 7000, 7003];

impl ApiErrorMapper for CloudflareProvider {
    const PROVIDER: &'static str = "cloudflare";

    fn map_failure(&self, failure: ApiFailure, zone: Option<&str>) -> ProviderError {
        let provider = Self::PROVIDER.to_string();
        let ApiFailure { code, message } = failure;
        match code {
            Some(c) if AUTH_CODES.contains(&c) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(message),
            },
            Some(FORBIDDEN) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(message),
            },
            Some(c) if MISSING_ZONE_CODES.contains(&c) => ProviderError::ZoneNotFound {
                provider,
                zone: zone.unwrap_or("<unknown>").to_string(),
                raw_message: Some(message),
            },
            _ => ProviderError::Unknown {
                provider,
                raw_code: code.map(|c| c.to_string()),
                raw_message: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CloudflareAuth;

    fn cf() -> CloudflareProvider {
        CloudflareProvider::new(CloudflareAuth::ApiToken {
            token: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn every_auth_code_is_invalid_credentials() {
        for code in AUTH_CODES {
            let err = cf().map_failure(ApiFailure::new(Some(code), "Authentication error"), None);
            assert!(
                matches!(err, ProviderError::InvalidCredentials { .. }),
                "{code} -> {err:?}"
            );
        }
    }

    #[test]
    fn scope_error_is_permission_denied() {
        let err = cf().map_failure(
            ApiFailure::new(Some(9109), "Unauthorized to access requested resource"),
            None,
        );
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
        assert!(err.is_expected());
    }

    #[test]
    fn routing_error_names_the_zone() {
        let err = cf().map_failure(
            ApiFailure::new(Some(7003), "Could not route to /zones/abc"),
            Some("abc"),
        );
        assert!(matches!(&err, ProviderError::ZoneNotFound { zone, .. } if zone == "abc"));
    }

    #[test]
    fn duplicate_zone_code_passes_through() {
        let err = cf().map_failure(
            ApiFailure::new(Some(1061), "exsub.example.com already exists"),
            None,
        );
        assert!(matches!(
            &err,
            ProviderError::Unknown { raw_code: Some(code), .. } if code == "1061"
        ));
        assert_eq!(err.to_string(), "[cloudflare] exsub.example.com already exists");
    }

    #[test]
    fn codeless_failure_is_unknown() {
        let err = cf().map_failure(ApiFailure::new(None, "Unknown error"), None);
        assert!(matches!(err, ProviderError::Unknown { raw_code: None, .. }));
    }
}
