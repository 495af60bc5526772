//! 候选域名来源 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Produces the ordered candidate list for a run.
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Human-readable description, used in logs.
    fn name(&self) -> String;

    /// Fetch the candidate domains.
    ///
    /// # Errors
    /// * `CoreError::SeedUnavailable` - the backing directory or file is missing
    async fn fetch(&self) -> CoreResult<Vec<String>>;
}
