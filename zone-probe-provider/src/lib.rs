//! # zone-probe-provider
//!
//! A small client library for the zone-management half of a DNS hosting
//! provider's API: registering a zone, deleting it again, and listing the
//! zones an account holds.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | `X-Auth-Email` + `X-Auth-Key`, or Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)* — Enable the Cloudflare provider.
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_probe_provider::{
//!     create_provider, CloudflareAuth, CreateZoneRequest, ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ProviderCredentials::Cloudflare {
//!         auth: CloudflareAuth::ApiKey {
//!             email: "ops@example.com".to_string(),
//!             api_key: "global-api-key".to_string(),
//!         },
//!         account_id: "account-id".to_string(),
//!     };
//!     let provider = create_provider(credentials)?;
//!
//!     let request = CreateZoneRequest::new("exsub.example.com", "account-id");
//!     let response = provider.create_zone(&request).await?;
//!     if let Some(zone_id) = response.zone_id() {
//!         provider.delete_zone(zone_id).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Zone creation and deletion return the provider's response envelope verbatim
//! as a [`ZoneApiResponse`], including `success: false` answers, because callers
//! want to record exactly what the provider said. Only problems that prevent a
//! well-formed answer (network failures, timeouts, unparseable bodies) surface as
//! [`ProviderError`].

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, create_provider_with};

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneProvider;

// Re-export types
pub use types::{
    ApiMessage, CloudflareAuth, CreateZoneRequest, PaginatedResponse, PaginationParams,
    ProviderCredentials, ProviderZone, ZoneApiResponse, ZoneStatus,
};

// Re-export utils module
pub use utils::log_sanitizer::{mask_secret, truncate_for_log};

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
