//! 注册探测服务
//!
//! 对单个候选域名执行 创建 zone → 检查结果 → 立即删除。
//! 任何传输错误都在这里折叠成失败结果，不会向上抛出。

use std::sync::Arc;

use zone_probe_provider::{CreateZoneRequest, ZoneApiResponse, ZoneProvider};

use crate::types::{CleanupStatus, ProbeOutcome};

/// Zone name registered for `candidate`: `<prefix>.<candidate>`.
///
/// A trailing root dot on the candidate is dropped.
#[must_use]
pub fn derive_name(prefix: &str, candidate: &str) -> String {
    format!("{prefix}.{}", candidate.trim_end_matches('.'))
}

/// Registers and immediately removes the derived zone for one candidate.
pub struct ProbeService {
    provider: Arc<dyn ZoneProvider>,
    account_id: String,
    prefix: String,
}

impl ProbeService {
    #[must_use]
    pub fn new(
        provider: Arc<dyn ZoneProvider>,
        account_id: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            account_id: account_id.into(),
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Probe one candidate.
    pub async fn probe(&self, candidate: &str) -> ProbeOutcome {
        let derived_name = derive_name(&self.prefix, candidate);
        let request = CreateZoneRequest::new(&derived_name, &self.account_id);

        let response = match self.provider.create_zone(&request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("[{derived_name}] create request failed: {e}");
                ZoneApiResponse::failure(e.to_string())
            }
        };

        if !response.success {
            log::info!("✗ FAILED: {derived_name}: {}", response.first_error_message());
            return ProbeOutcome {
                candidate: candidate.to_string(),
                derived_name,
                success: false,
                raw_response: response.raw,
                zone_id: None,
                cleanup: CleanupStatus::NotAttempted,
            };
        }

        log::info!("✓ SUCCESS: {derived_name}");
        let zone_id = response.zone_id().map(ToString::to_string);
        let cleanup = match &zone_id {
            Some(id) => self.cleanup(&derived_name, id).await,
            None => {
                log::warn!("[{derived_name}] No zone ID returned, cannot delete");
                CleanupStatus::MissingZoneId
            }
        };

        ProbeOutcome {
            candidate: candidate.to_string(),
            derived_name,
            success: true,
            raw_response: response.raw,
            zone_id,
            cleanup,
        }
    }

    async fn cleanup(&self, derived_name: &str, zone_id: &str) -> CleanupStatus {
        log::debug!("[{derived_name}] Deleting zone {zone_id}");
        let message = match self.provider.delete_zone(zone_id).await {
            Ok(resp) if resp.success => {
                log::info!("→ DELETED: {derived_name} ({zone_id})");
                return CleanupStatus::Deleted;
            }
            Ok(resp) => resp.first_error_message().to_string(),
            Err(e) => e.to_string(),
        };
        log::error!(
            "DELETE FAILED: {derived_name} ({zone_id}) is still live and needs manual removal: {message}"
        );
        CleanupStatus::DeleteFailed(message)
    }
}
