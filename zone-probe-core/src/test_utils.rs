//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{Mutex, RwLock};
use zone_probe_provider::{
    CreateZoneRequest, PaginatedResponse, PaginationParams, ProviderError, ProviderZone,
    ZoneApiResponse, ZoneProvider, ZoneStatus,
};

use crate::error::{CoreError, CoreResult};
use crate::traits::{NsLookup, OutcomeLedger, SeedSource, StageStore};
use crate::types::{LookupOutcome, ProbeOutcome, Stage};

type ProviderResult<T> = Result<T, ProviderError>;

// ===== 工厂方法 =====

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// `{"success":true,"errors":[],"result":{"id":..}}`, or `"result":null` when `id` is `None`.
pub fn success_envelope(id: Option<&str>) -> ZoneApiResponse {
    let result = id.map_or(serde_json::Value::Null, |id| json!({ "id": id }));
    ZoneApiResponse::from_value(json!({
        "success": true,
        "errors": [],
        "result": result,
    }))
}

pub fn failure_envelope(message: &str) -> ZoneApiResponse {
    ZoneApiResponse::from_value(json!({
        "success": false,
        "errors": [{ "code": 1061, "message": message }],
        "result": null,
    }))
}

pub fn zone(id: &str) -> ProviderZone {
    ProviderZone {
        id: id.to_string(),
        name: format!("exsub.{id}.test"),
        status: ZoneStatus::Pending,
        created_at: None,
    }
}

// ===== MockZoneProvider =====

pub struct MockZoneProvider {
    creates: RwLock<HashMap<String, ProviderResult<ZoneApiResponse>>>,
    deletes: RwLock<HashMap<String, ProviderResult<ZoneApiResponse>>>,
    pages: Mutex<VecDeque<ProviderResult<PaginatedResponse<ProviderZone>>>>,
    create_calls: Mutex<Vec<CreateZoneRequest>>,
    delete_calls: Mutex<Vec<String>>,
    list_calls: Mutex<Vec<u32>>,
}

impl MockZoneProvider {
    pub fn new() -> Self {
        Self {
            creates: RwLock::new(HashMap::new()),
            deletes: RwLock::new(HashMap::new()),
            pages: Mutex::new(VecDeque::new()),
            create_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
        }
    }

    /// 未配置的 zone 名返回 `failure_envelope("unscripted")`
    pub async fn script_create(&self, name: &str, result: ProviderResult<ZoneApiResponse>) {
        self.creates.write().await.insert(name.to_string(), result);
    }

    /// 未配置的 zone id 删除成功
    pub async fn script_delete(&self, zone_id: &str, result: ProviderResult<ZoneApiResponse>) {
        self.deletes.write().await.insert(zone_id.to_string(), result);
    }

    /// 按顺序返回的分页结果；耗尽后返回空页
    pub async fn push_page(&self, page: ProviderResult<PaginatedResponse<ProviderZone>>) {
        self.pages.lock().await.push_back(page);
    }

    pub async fn create_calls(&self) -> Vec<CreateZoneRequest> {
        self.create_calls.lock().await.clone()
    }

    pub async fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().await.clone()
    }

    pub async fn list_pages(&self) -> Vec<u32> {
        self.list_calls.lock().await.clone()
    }
}

#[async_trait]
impl ZoneProvider for MockZoneProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn create_zone(&self, req: &CreateZoneRequest) -> ProviderResult<ZoneApiResponse> {
        self.create_calls.lock().await.push(req.clone());
        self.creates
            .read()
            .await
            .get(&req.name)
            .cloned()
            .unwrap_or_else(|| Ok(failure_envelope("unscripted")))
    }

    async fn delete_zone(&self, zone_id: &str) -> ProviderResult<ZoneApiResponse> {
        self.delete_calls.lock().await.push(zone_id.to_string());
        self.deletes
            .read()
            .await
            .get(zone_id)
            .cloned()
            .unwrap_or_else(|| Ok(success_envelope(Some(zone_id))))
    }

    async fn list_zones(
        &self,
        params: &PaginationParams,
    ) -> ProviderResult<PaginatedResponse<ProviderZone>> {
        self.list_calls.lock().await.push(params.page);
        self.pages.lock().await.pop_front().unwrap_or_else(|| {
            Ok(PaginatedResponse::new(
                Vec::new(),
                params.page,
                params.page_size,
                0,
                0,
            ))
        })
    }
}

// ===== MockNsLookup =====

pub struct MockNsLookup {
    outcomes: RwLock<HashMap<String, LookupOutcome>>,
    queries: Mutex<Vec<String>>,
}

impl MockNsLookup {
    pub fn new() -> Self {
        Self {
            outcomes: RwLock::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub async fn set(&self, domain: &str, outcome: LookupOutcome) {
        self.outcomes
            .write()
            .await
            .insert(domain.to_string(), outcome);
    }

    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl NsLookup for MockNsLookup {
    async fn lookup_ns(&self, domain: &str) -> LookupOutcome {
        self.queries.lock().await.push(domain.to_string());
        self.outcomes
            .read()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_else(|| LookupOutcome::Error("unscripted".to_string()))
    }
}

// ===== MockSeedSource =====

pub struct MockSeedSource {
    items: Vec<String>,
    error: RwLock<Option<String>>,
    fetches: AtomicUsize,
}

impl MockSeedSource {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            error: RwLock::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// fetch 时返回 `SeedUnavailable`
    pub async fn fail_with(&self, msg: &str) {
        *self.error.write().await = Some(msg.to_string());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedSource for MockSeedSource {
    fn name(&self) -> String {
        "mock".to_string()
    }

    async fn fetch(&self) -> CoreResult<Vec<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.error.read().await {
            return Err(CoreError::SeedUnavailable(msg.clone()));
        }
        Ok(self.items.clone())
    }
}

// ===== InMemoryStageStore =====

pub struct InMemoryStageStore {
    stages: RwLock<HashMap<Stage, Vec<String>>>,
}

impl InMemoryStageStore {
    pub fn new() -> Self {
        Self {
            stages: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, stage: Stage) -> Option<Vec<String>> {
        self.stages.read().await.get(&stage).cloned()
    }

    pub async fn put(&self, stage: Stage, items: Vec<String>) {
        self.stages.write().await.insert(stage, items);
    }
}

#[async_trait]
impl StageStore for InMemoryStageStore {
    async fn load(&self, stage: Stage) -> CoreResult<Option<Vec<String>>> {
        Ok(self.get(stage).await)
    }

    async fn save(&self, stage: Stage, items: &[String]) -> CoreResult<()> {
        self.put(stage, items.to_vec()).await;
        Ok(())
    }
}

// ===== MemoryLedger =====

pub struct MemoryLedger {
    successes: RwLock<Vec<ProbeOutcome>>,
    failures: RwLock<Vec<ProbeOutcome>>,
    fail: RwLock<bool>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            successes: RwLock::new(Vec::new()),
            failures: RwLock::new(Vec::new()),
            fail: RwLock::new(false),
        }
    }

    /// 为 true 时 record 返回 `StorageError`
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn successes(&self) -> Vec<ProbeOutcome> {
        self.successes.read().await.clone()
    }

    pub async fn failures(&self) -> Vec<ProbeOutcome> {
        self.failures.read().await.clone()
    }
}

#[async_trait]
impl OutcomeLedger for MemoryLedger {
    async fn record(&self, outcome: &ProbeOutcome) -> CoreResult<()> {
        if *self.fail.read().await {
            return Err(CoreError::StorageError("disk full".to_string()));
        }
        if outcome.success {
            self.successes.write().await.push(outcome.clone());
        } else {
            self.failures.write().await.push(outcome.clone());
        }
        Ok(())
    }
}
