//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use zone_probe_core::services::{PipelineService, ProbeService, ServiceContext};
use zone_probe_core::storage::{FileLedger, FileStageCache};
use zone_probe_core::traits::{NsLookup, SeedSource};
use zone_probe_core::types::{
    CreateZoneRequest, LookupOutcome, PaginatedResponse, PaginationParams, ProviderZone,
    ZoneApiResponse,
};
use zone_probe_core::utils::Pacer;
use zone_probe_core::CoreResult;
use zone_probe_provider::{ProviderError, ZoneProvider};

/// Provider whose create responses are keyed by zone name.
#[derive(Default)]
pub struct ScriptedProvider {
    pub creates: Mutex<HashMap<String, Result<ZoneApiResponse, ProviderError>>>,
    pub create_calls: Mutex<Vec<String>>,
    pub delete_calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub async fn on_create(&self, name: &str, body: serde_json::Value) {
        self.creates
            .lock()
            .await
            .insert(name.to_string(), Ok(ZoneApiResponse::from_value(body)));
    }
}

#[async_trait]
impl ZoneProvider for ScriptedProvider {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> Result<ZoneApiResponse, ProviderError> {
        self.create_calls.lock().await.push(req.name.clone());
        self.creates
            .lock()
            .await
            .get(&req.name)
            .cloned()
            .unwrap_or_else(|| {
                Ok(ZoneApiResponse::from_value(json!({
                    "success": false,
                    "errors": [{ "code": 1097, "message": "not a registered domain" }]
                })))
            })
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ZoneApiResponse, ProviderError> {
        self.delete_calls.lock().await.push(zone_id.to_string());
        Ok(ZoneApiResponse::from_value(
            json!({ "success": true, "result": { "id": zone_id } }),
        ))
    }

    async fn list_zones(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<ProviderZone>, ProviderError> {
        Ok(PaginatedResponse::new(Vec::new(), params.page, params.page_size, 0, 0))
    }
}

/// Lookup with fixed answers; unknown names have records.
#[derive(Default)]
pub struct ScriptedLookup {
    pub answers: Mutex<HashMap<String, LookupOutcome>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub async fn answer(&self, domain: &str, outcome: LookupOutcome) {
        self.answers.lock().await.insert(domain.to_string(), outcome);
    }
}

#[async_trait]
impl NsLookup for ScriptedLookup {
    async fn lookup_ns(&self, domain: &str) -> LookupOutcome {
        self.calls.lock().await.push(domain.to_string());
        self.answers
            .lock()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_else(|| LookupOutcome::RecordsFound(vec![format!("ns1.{domain}")]))
    }
}

/// Seed source returning a fixed list and counting fetches.
pub struct FixedSeed {
    pub items: Vec<String>,
    pub fetches: Mutex<usize>,
}

impl FixedSeed {
    pub fn new(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(ToString::to_string).collect(),
            fetches: Mutex::new(0),
        }
    }
}

#[async_trait]
impl SeedSource for FixedSeed {
    fn name(&self) -> String {
        "fixed".to_string()
    }

    async fn fetch(&self) -> CoreResult<Vec<String>> {
        *self.fetches.lock().await += 1;
        Ok(self.items.clone())
    }
}

/// Working directory layout with the default file names.
pub struct Workdir {
    pub root: PathBuf,
}

impl Workdir {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn seed_cache(&self) -> PathBuf {
        self.root.join("base_domains.txt")
    }

    pub fn nxdomain_cache(&self) -> PathBuf {
        self.root.join("nxdomain_base_domains.txt")
    }

    pub fn success_log(&self) -> PathBuf {
        self.root.join("add_cf_success.txt")
    }

    pub fn failure_log(&self) -> PathBuf {
        self.root.join("add_cf_failed.txt")
    }

    pub fn lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    pub fn pipeline(
        &self,
        seed: Arc<FixedSeed>,
        lookup: Arc<ScriptedLookup>,
        provider: Arc<ScriptedProvider>,
    ) -> PipelineService {
        let ctx = ServiceContext::new(
            seed,
            Arc::new(FileStageCache::new(self.seed_cache(), self.nxdomain_cache())),
            lookup,
            Arc::new(FileLedger::new(self.success_log(), self.failure_log())),
        );
        PipelineService::new(ctx, Pacer::disabled(), Pacer::disabled())
            .with_prober(ProbeService::new(provider, "acct", "exsub"))
    }
}
