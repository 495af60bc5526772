use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a provider call that produced no usable API answer.
///
/// A zone create/delete that the provider *rejected* is not an error: the
/// rejection comes back as a [`ZoneApiResponse`](crate::ZoneApiResponse) with
/// `success: false`. Listing is the exception; there a rejected page is mapped
/// onto one of the credential / permission / zone variants below.
///
/// Every variant names the provider it came from. The enum serializes with a
/// `code` tag so it can be written into structured output as-is.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection could not be made or the body could not be read.
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    /// The client-side request timeout elapsed.
    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// HTTP 429. `retry_after` is the `Retry-After` header in seconds.
    #[error("[{provider}] Rate limited{}", retry_hint(.retry_after))]
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// Unknown key/email pair, malformed token and the like.
    #[error("[{provider}] Invalid credentials{}", detail_suffix(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// Credentials are valid but not scoped for this account or operation.
    #[error("[{provider}] Permission denied{}", detail_suffix(.raw_message))]
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// `zone` is the id or name the request referred to.
    #[error("[{provider}] Zone '{zone}' not found{}", detail_suffix(.raw_message))]
    ZoneNotFound {
        provider: String,
        zone: String,
        raw_message: Option<String>,
    },

    /// The body was empty or not the JSON shape expected.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// Provider error code without a dedicated mapping.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

fn detail_suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_deref()
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

impl ProviderError {
    /// 调用方配置问题（凭证、权限、zone 不存在）返回 `true`，日志用 `warn`；
    /// 其余（网络、超时、解析）返回 `false`，日志用 `error`。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
        )
    }

    /// Provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::ZoneNotFound { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

/// `Result` specialised to [`ProviderError`].
pub type Result<T> = std::result::Result<T, ProviderError>;
