use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateZoneRequest, PaginatedResponse, PaginationParams, ProviderZone, ZoneApiResponse,
};

/// 一次被 API 拒绝的调用：首个错误的代码与消息（内部使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiFailure {
    pub code: Option<i64>,
    pub message: String,
}

impl ApiFailure {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// 把 Provider 自己的错误码翻译成 [`ProviderError`]（内部使用）
pub(crate) trait ApiErrorMapper {
    /// 写入错误里的 Provider 标识符
    const PROVIDER: &'static str;

    /// `zone` 为请求涉及的 zone id / 名称，未涉及时为 `None`
    fn map_failure(&self, failure: ApiFailure, zone: Option<&str>) -> ProviderError;

    /// 响应结构与预期不符
    fn malformed(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: Self::PROVIDER.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Zone 管理 Trait
///
/// `create_zone` / `delete_zone` 把 Provider 的响应信封原样交回，
/// `success: false` 也是 `Ok`；拿不到响应（网络、超时、无法解析）才是 `Err`。
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// `POST` 一个新 zone
    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ZoneApiResponse>;

    /// 按 id 删除 zone
    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneApiResponse>;

    /// 列出账户下的 zone，一次一页。
    ///
    /// 这里 API 的 `success: false` 会被映射为 `ProviderError`。
    async fn list_zones(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderZone>>;
}
