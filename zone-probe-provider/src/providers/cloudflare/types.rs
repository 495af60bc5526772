//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CloudflareResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_on: Option<String>,
}

/// `POST /zones` 请求体
#[derive(Debug, Serialize)]
pub struct CloudflareCreateZoneBody<'a> {
    pub account: CloudflareAccountRef<'a>,
    pub name: &'a str,
    pub jump_start: bool,
}

#[derive(Debug, Serialize)]
pub struct CloudflareAccountRef<'a> {
    pub id: &'a str,
}
