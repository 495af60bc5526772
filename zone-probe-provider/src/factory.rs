//! Provider factory functions.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::providers::common::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::traits::ZoneProvider;
use crate::types::ProviderCredentials;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;

/// Creates a [`ZoneProvider`] instance from the given credentials, using the
/// provider's public API endpoint and default timeouts.
///
/// # Examples
///
/// ```rust,no_run
/// use zone_probe_provider::{create_provider, CloudflareAuth, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Cloudflare {
///     auth: CloudflareAuth::ApiToken { token: "your-token".to_string() },
///     account_id: "account-id".to_string(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn ZoneProvider>> {
    create_provider_with(
        credentials,
        None,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
    )
}

/// Like [`create_provider`], with an overridden API base URL and request timeout.
pub fn create_provider_with(
    credentials: ProviderCredentials,
    api_base: Option<String>,
    request_timeout: Duration,
) -> Result<Arc<dyn ZoneProvider>> {
    match credentials {
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { auth, .. } => Ok(Arc::new(
            CloudflareProvider::with_settings(auth, api_base, request_timeout)?,
        )),
        #[cfg(not(feature = "cloudflare"))]
        ProviderCredentials::Cloudflare { .. } => {
            let _ = (api_base, request_timeout);
            Err(crate::error::ProviderError::Unknown {
                provider: "cloudflare".to_string(),
                raw_code: None,
                raw_message: "feature `cloudflare` is not enabled".to_string(),
            })
        }
    }
}
