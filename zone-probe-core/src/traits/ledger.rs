//! 结果账本抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ProbeOutcome;

/// Append-only record of probe outcomes.
///
/// Each call appends exactly one entry; existing entries are never rewritten.
#[async_trait]
pub trait OutcomeLedger: Send + Sync {
    /// Append one outcome, routed by its `success` flag.
    async fn record(&self, outcome: &ProbeOutcome) -> CoreResult<()>;
}
