//! 业务逻辑服务层

mod pipeline_service;
mod probe_service;
mod purge_service;

pub use pipeline_service::{PipelineService, StageOutput};
pub use probe_service::{derive_name, ProbeService};
pub use purge_service::{PurgeService, PURGE_PAGE_SIZE};

use std::sync::Arc;

use crate::traits::{NsLookup, OutcomeLedger, SeedSource, StageStore};

/// 服务上下文 - 持有流水线的存储与网络依赖
///
/// 平台层创建此上下文，并注入具体实现（文件缓存、hickory 解析器等）。
pub struct ServiceContext {
    /// 候选域名来源
    pub seed_source: Arc<dyn SeedSource>,
    /// 阶段缓存
    pub stage_store: Arc<dyn StageStore>,
    /// NS 查询
    pub ns_lookup: Arc<dyn NsLookup>,
    /// 结果账本
    pub ledger: Arc<dyn OutcomeLedger>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        seed_source: Arc<dyn SeedSource>,
        stage_store: Arc<dyn StageStore>,
        ns_lookup: Arc<dyn NsLookup>,
        ledger: Arc<dyn OutcomeLedger>,
    ) -> Self {
        Self {
            seed_source,
            stage_store,
            ns_lookup,
            ledger,
        }
    }
}
