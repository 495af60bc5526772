//! 类型定义模块

mod dns;
mod probe;
mod stage;
mod summary;

pub use dns::{Classification, LookupOutcome};
pub use probe::{CleanupStatus, ProbeOutcome};
pub use stage::Stage;
pub use summary::{ProbeStats, PurgeSummary, RunSummary};

// Re-export provider 库的公共类型
pub use zone_probe_provider::{
    CloudflareAuth, CreateZoneRequest, PaginatedResponse, PaginationParams, ProviderCredentials,
    ProviderZone, ZoneApiResponse, ZoneStatus,
};
