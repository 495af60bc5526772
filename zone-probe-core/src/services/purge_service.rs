//! 账户 zone 批量清理服务

use std::sync::Arc;

use zone_probe_provider::{PaginationParams, ProviderZone, ZoneProvider};

use crate::error::CoreResult;
use crate::types::PurgeSummary;
use crate::utils::Pacer;

/// Zones requested per listing page.
pub const PURGE_PAGE_SIZE: u32 = 50;

/// Lists and deletes every zone in the account.
pub struct PurgeService {
    provider: Arc<dyn ZoneProvider>,
    pacer: Pacer,
}

impl PurgeService {
    #[must_use]
    pub fn new(provider: Arc<dyn ZoneProvider>, pacer: Pacer) -> Self {
        Self { provider, pacer }
    }

    /// Collect all zones page by page.
    ///
    /// A failure on the first page is returned; a failure on a later page
    /// is logged and ends the listing with what was gathered so far.
    pub async fn list_all_zones(&self) -> CoreResult<Vec<ProviderZone>> {
        let mut zones = Vec::new();
        let mut page = 1;

        loop {
            let params = PaginationParams {
                page,
                page_size: PURGE_PAGE_SIZE,
            };
            let response = match self.provider.list_zones(&params).await {
                Ok(response) => response,
                Err(e) if page == 1 => return Err(e.into()),
                Err(e) => {
                    log::error!("Error fetching zones page {page}: {e}");
                    break;
                }
            };

            if response.items.is_empty() {
                break;
            }
            log::info!("Fetched page {page}: {} zones", response.items.len());
            zones.extend(response.items);

            if page >= response.total_pages {
                break;
            }
            page += 1;
            self.pacer.pause().await;
        }

        Ok(zones)
    }

    /// Delete each zone in order. Failures are counted, never fatal.
    pub async fn delete_zones(&self, zones: &[ProviderZone]) -> PurgeSummary {
        let total = zones.len();
        let mut summary = PurgeSummary {
            total,
            ..PurgeSummary::default()
        };

        for (i, zone) in zones.iter().enumerate() {
            let result = self.provider.delete_zone(&zone.id).await;
            match result {
                Ok(resp) if resp.success => {
                    log::info!("[{}/{total}] Deleting {}... DELETED", i + 1, zone.name);
                    summary.deleted += 1;
                }
                Ok(resp) => {
                    log::warn!(
                        "[{}/{total}] Deleting {}... FAILED: {}",
                        i + 1,
                        zone.name,
                        resp.first_error_message()
                    );
                    summary.failed += 1;
                }
                Err(e) => {
                    log::warn!("[{}/{total}] Deleting {}... FAILED: {e}", i + 1, zone.name);
                    summary.failed += 1;
                }
            }

            if i + 1 < total {
                self.pacer.pause().await;
            }
        }

        log::info!(
            "Deleted {} of {} zones ({} failed)",
            summary.deleted,
            summary.total,
            summary.failed
        );
        summary
    }
}
