//! Public data types shared by all providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::utils::log_sanitizer::mask_secret;

// ============ Pagination Types ============

/// Pagination parameters for list operations.
///
/// # Default
///
/// The default is `page = 1, page_size = 50`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl PaginationParams {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// A paginated response wrapper.
///
/// # Type Parameters
///
/// * `T` — The item type (e.g., [`ProviderZone`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
    /// Total number of pages, as reported by the provider.
    pub total_pages: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32, total_pages: u32) -> Self {
        let has_more = page < total_pages;
        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_more,
        }
    }
}

// ============ Zone Types ============

/// Lifecycle state of a zone as reported by the provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Active,
    Pending,
    Moved,
    Unknown,
}

/// A zone held by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderZone {
    /// Provider-assigned zone identifier.
    pub id: String,
    /// Zone name, e.g. `exsub.example.com`.
    pub name: String,
    pub status: ZoneStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to register a new zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateZoneRequest {
    /// Fully qualified zone name.
    pub name: String,
    /// Account the zone is created under.
    pub account_id: String,
    /// Ask the provider to scan and import existing records on creation.
    pub jump_start: bool,
}

impl CreateZoneRequest {
    /// Build a request with `jump_start` enabled.
    pub fn new(name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: account_id.into(),
            jump_start: true,
        }
    }
}

/// One entry of the `errors` / `messages` arrays of a response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Verbatim response envelope of a zone create/delete call.
///
/// The typed fields are read leniently from [`raw`](Self::raw), which is kept
/// exactly as the provider sent it so it can be persisted unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneApiResponse {
    /// The envelope's `success` flag; a missing flag counts as `false`.
    pub success: bool,
    /// Parsed `errors` array (empty when absent or malformed).
    pub errors: Vec<ApiMessage>,
    /// The complete JSON body.
    pub raw: Value,
}

impl ZoneApiResponse {
    /// Wrap a decoded JSON body.
    pub fn from_value(raw: Value) -> Self {
        let success = raw.get("success").and_then(Value::as_bool).unwrap_or(false);
        let errors = raw
            .get("errors")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            success,
            errors,
            raw,
        }
    }

    /// Synthesize a failure envelope carrying a single error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::from_value(json!({
            "success": false,
            "errors": [{ "message": message.into() }],
        }))
    }

    /// The envelope's `result` object, if any.
    pub fn result(&self) -> Option<&Value> {
        self.raw.get("result").filter(|v| !v.is_null())
    }

    /// `result.id`, when the provider returned one.
    pub fn zone_id(&self) -> Option<&str> {
        self.result()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Message of the first error, or `"Unknown error"`.
    pub fn first_error_message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or("Unknown error")
    }
}

// ============ Credential Types ============

/// How requests authenticate against Cloudflare.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CloudflareAuth {
    /// Global API key, sent as `X-Auth-Email` + `X-Auth-Key`.
    ApiKey { email: String, api_key: String },
    /// Scoped API token, sent as `Authorization: Bearer`.
    ApiToken { token: String },
}

impl std::fmt::Debug for CloudflareAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey { email, api_key } => f
                .debug_struct("ApiKey")
                .field("email", email)
                .field("api_key", &mask_secret(api_key))
                .finish(),
            Self::ApiToken { token } => f
                .debug_struct("ApiToken")
                .field("token", &mask_secret(token))
                .finish(),
        }
    }
}

/// Type-safe credential container for all supported providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// Cloudflare credentials. The client itself requires feature `cloudflare`.
    #[serde(rename = "cloudflare")]
    Cloudflare {
        auth: CloudflareAuth,
        /// Account new zones are created under.
        account_id: String,
    },
}

impl ProviderCredentials {
    /// Account id the credentials act on.
    pub fn account_id(&self) -> &str {
        match self {
            Self::Cloudflare { account_id, .. } => account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_zone_id() {
        let resp = ZoneApiResponse::from_value(json!({
            "success": true,
            "errors": [],
            "result": { "id": "z1", "name": "exsub.b.test" }
        }));
        assert!(resp.success);
        assert_eq!(resp.zone_id(), Some("z1"));
    }

    #[test]
    fn envelope_with_null_result_has_no_zone_id() {
        let resp = ZoneApiResponse::from_value(json!({ "success": true, "result": null }));
        assert!(resp.success);
        assert_eq!(resp.zone_id(), None);
        assert!(resp.result().is_none());
    }

    #[test]
    fn envelope_first_error_message() {
        let resp = ZoneApiResponse::from_value(json!({
            "success": false,
            "errors": [{ "code": 1061, "message": "already exists" }]
        }));
        assert!(!resp.success);
        assert_eq!(resp.first_error_message(), "already exists");
        assert_eq!(resp.errors[0].code, Some(1061));
    }

    #[test]
    fn envelope_without_errors_reports_unknown() {
        let resp = ZoneApiResponse::from_value(json!({ "success": false }));
        assert_eq!(resp.first_error_message(), "Unknown error");
    }

    #[test]
    fn envelope_missing_success_flag_is_failure() {
        let resp = ZoneApiResponse::from_value(json!({ "result": { "id": "z1" } }));
        assert!(!resp.success);
    }

    #[test]
    fn synthesized_failure_matches_provider_shape() {
        let resp = ZoneApiResponse::failure("connection reset");
        assert_eq!(
            resp.raw,
            json!({ "success": false, "errors": [{ "message": "connection reset" }] })
        );
        assert_eq!(resp.first_error_message(), "connection reset");
    }

    #[test]
    fn auth_debug_redacts_secrets() {
        let auth = CloudflareAuth::ApiKey {
            email: "ops@example.com".to_string(),
            api_key: "3ab3e76296fb4290b1b9".to_string(),
        };
        let printed = format!("{auth:?}");
        assert!(printed.contains("ops@example.com"));
        assert!(printed.contains("****b1b9"));
        assert!(!printed.contains("3ab3e762"));
    }

    #[test]
    fn paginated_response_has_more() {
        let page: PaginatedResponse<u32> = PaginatedResponse::new(vec![1, 2], 1, 2, 3, 2);
        assert!(page.has_more);
        let last: PaginatedResponse<u32> = PaginatedResponse::new(vec![3], 2, 2, 3, 2);
        assert!(!last.has_more);
    }

    #[test]
    fn pagination_validated_clamps() {
        let p = PaginationParams {
            page: 0,
            page_size: 500,
        }
        .validated(50);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 50);
    }
}
