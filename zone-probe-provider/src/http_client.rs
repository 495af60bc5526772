//! Request execution shared by providers.
//!
//! A provider builds the `RequestBuilder` (URL, auth headers, body) and hands
//! it here together with a [`CallSite`] used for logs and error attribution.
//! Each request is sent once; there is no retry loop at this layer.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Who is calling what, for log lines and error attribution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CallSite<'a> {
    pub provider: &'a str,
    pub method: &'a str,
    pub url: &'a str,
}

impl CallSite<'_> {
    fn network(&self, detail: String) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider.to_string(),
            detail,
        }
    }

    fn parse(&self, detail: String) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider.to_string(),
            detail,
        }
    }
}

/// Send the request and decode the body as JSON, whatever the HTTP status.
///
/// Cloudflare answers a rejected zone request with a 4xx status and a
/// well-formed `{"success": false, ...}` envelope; that envelope is returned
/// as `Ok`. Only 429, transport failures and unreadable bodies are errors.
pub(crate) async fn send_json(builder: RequestBuilder, site: CallSite<'_>) -> Result<Value> {
    let (status, body) = send(builder, site).await?;
    if body.trim().is_empty() {
        return Err(site.parse(format!("Empty response body (HTTP {})", status.as_u16())));
    }
    decode(&body, site)
}

async fn send(builder: RequestBuilder, site: CallSite<'_>) -> Result<(StatusCode, String)> {
    log::debug!("[{}] {} {}", site.provider, site.method, site.url);

    let response = builder.send().await.map_err(|e| {
        if e.is_timeout() {
            ProviderError::Timeout {
                provider: site.provider.to_string(),
                detail: e.to_string(),
            }
        } else {
            site.network(e.to_string())
        }
    })?;

    let status = response.status();
    log::debug!("[{}] <- HTTP {}", site.provider, status.as_u16());

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(rate_limited(response, site).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| site.network(format!("Failed to read response body: {e}")))?;
    log::debug!("[{}] body: {}", site.provider, truncate_for_log(&body));
    Ok((status, body))
}

async fn rate_limited(response: Response, site: CallSite<'_>) -> ProviderError {
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.ok().filter(|b| !b.is_empty());
    log::warn!(
        "[{}] {} {} hit the rate limit, retry_after={retry_after:?}",
        site.provider,
        site.method,
        site.url
    );
    ProviderError::RateLimited {
        provider: site.provider.to_string(),
        retry_after,
        raw_message: body,
    }
}

/// Decode a body into `T`, logging a truncated copy of it on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, site: CallSite<'_>) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        log::error!(
            "[{}] {} {} returned undecodable body ({e}): {}",
            site.provider,
            site.method,
            site.url,
            truncate_for_log(body)
        );
        site.parse(e.to_string())
    })
}
