//! Cloudflare Zones Provider

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client};
use crate::types::CloudflareAuth;

pub(crate) use types::{CloudflareCreateZoneBody, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;

/// Cloudflare Zones Provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) auth: CloudflareAuth,
    pub(crate) api_base: String,
}

impl CloudflareProvider {
    /// 使用默认 API 地址与超时创建
    pub fn new(auth: CloudflareAuth) -> Result<Self> {
        Self::with_settings(
            auth,
            None,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// 自定义 API 地址（测试或代理）与请求超时
    pub fn with_settings(
        auth: CloudflareAuth,
        api_base: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let api_base = api_base
            .map(|b| b.trim_end_matches('/').to_string())
            .unwrap_or_else(|| CF_API_BASE.to_string());
        Ok(Self {
            client: create_http_client("cloudflare", request_timeout)?,
            auth,
            api_base,
        })
    }
}
