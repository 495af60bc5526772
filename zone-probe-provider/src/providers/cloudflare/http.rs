//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{CallSite, send_json};
use crate::traits::{ApiErrorMapper, ApiFailure};
use crate::types::{CloudflareAuth, PaginationParams, ZoneApiResponse};

use super::types::CloudflareResultInfo;
use super::{CloudflareProvider, CloudflareResponse, MAX_PAGE_SIZE_ZONES};

impl CloudflareProvider {
    /// 附加认证头
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            CloudflareAuth::ApiKey { email, api_key } => builder
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", api_key),
            CloudflareAuth::ApiToken { token } => builder.bearer_auth(token),
        }
    }

    fn site<'a>(method: &'a str, url: &'a str) -> CallSite<'a> {
        CallSite {
            provider: Self::PROVIDER,
            method,
            url,
        }
    }

    /// POST，响应信封原样返回
    pub(crate) async fn post_envelope<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ZoneApiResponse> {
        let url = format!("{}{path}", self.api_base);
        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(body) {
                Ok(json) => log::debug!("[cloudflare] request body: {json}"),
                Err(e) => log::debug!("[cloudflare] request body not serializable: {e}"),
            }
        }

        let builder = self.authorize(self.client.post(&url)).json(body);
        let raw = send_json(builder, Self::site("POST", &url)).await?;
        Ok(ZoneApiResponse::from_value(raw))
    }

    /// DELETE，响应信封原样返回
    pub(crate) async fn delete_envelope(&self, path: &str) -> Result<ZoneApiResponse> {
        let url = format!("{}{path}", self.api_base);
        let builder = self.authorize(self.client.delete(&url));
        let raw = send_json(builder, Self::site("DELETE", &url)).await?;
        Ok(ZoneApiResponse::from_value(raw))
    }

    /// 分页 GET；`success: false` 映射为 `ProviderError`
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &PaginationParams,
    ) -> Result<(Vec<T>, CloudflareResultInfo)> {
        let params = params.validated(MAX_PAGE_SIZE_ZONES);
        let url = format!(
            "{}{path}?page={}&per_page={}",
            self.api_base, params.page, params.page_size
        );

        let builder = self.authorize(self.client.get(&url));
        let raw = send_json(builder, Self::site("GET", &url)).await?;
        let envelope: CloudflareResponse<Vec<T>> =
            serde_json::from_value(raw).map_err(|e| self.malformed(e))?;

        if !envelope.success {
            let failure = envelope
                .errors
                .unwrap_or_default()
                .into_iter()
                .next()
                .map_or_else(
                    || ApiFailure::new(None, "Unknown error"),
                    |e| ApiFailure::new(Some(e.code), e.message),
                );
            log::error!("[cloudflare] GET {path} rejected: {}", failure.message);
            return Err(self.map_failure(failure, None));
        }

        Ok((
            envelope.result.unwrap_or_default(),
            envelope.result_info.unwrap_or_default(),
        ))
    }
}
