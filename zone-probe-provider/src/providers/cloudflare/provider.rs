//! Cloudflare ZoneProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::ZoneProvider;
use crate::types::{
    CreateZoneRequest, PaginatedResponse, PaginationParams, ProviderZone, ZoneApiResponse,
    ZoneStatus,
};
use crate::utils::datetime::parse_rfc3339;

use super::types::CloudflareAccountRef;
use super::{CloudflareCreateZoneBody, CloudflareProvider, CloudflareZone};

impl CloudflareProvider {
    /// 将 Cloudflare zone 转换为 `ProviderZone`
    /// Cloudflare 状态：active, pending, initializing, moved
    pub(crate) fn zone_to_provider_zone(zone: CloudflareZone) -> ProviderZone {
        let status = match zone.status.as_str() {
            "active" => ZoneStatus::Active,
            "pending" | "initializing" => ZoneStatus::Pending,
            "moved" => ZoneStatus::Moved,
            _ => ZoneStatus::Unknown,
        };

        ProviderZone {
            id: zone.id,
            name: normalize_domain_name(&zone.name),
            status,
            created_at: zone.created_on.as_deref().and_then(parse_rfc3339),
        }
    }
}

#[async_trait]
impl ZoneProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ZoneApiResponse> {
        let body = CloudflareCreateZoneBody {
            account: CloudflareAccountRef {
                id: &req.account_id,
            },
            name: &req.name,
            jump_start: req.jump_start,
        };
        self.post_envelope("/zones", &body).await
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneApiResponse> {
        self.delete_envelope(&format!("/zones/{zone_id}")).await
    }

    async fn list_zones(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderZone>> {
        let (zones, info) = self.get_paginated::<CloudflareZone>("/zones", params).await?;
        let items: Vec<ProviderZone> = zones
            .into_iter()
            .map(Self::zone_to_provider_zone)
            .collect();
        let page = if info.page == 0 { params.page } else { info.page };
        let page_size = if info.per_page == 0 {
            params.page_size
        } else {
            info.per_page
        };
        Ok(PaginatedResponse::new(
            items,
            page,
            page_size,
            info.total_count,
            info.total_pages.max(1),
        ))
    }
}
