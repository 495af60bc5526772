//! NS 查询抽象 Trait

use async_trait::async_trait;

use crate::types::LookupOutcome;

/// Nameserver-record lookup primitive.
///
/// Infallible by signature: every failure is expressed as
/// [`LookupOutcome::Timeout`] or [`LookupOutcome::Error`].
#[async_trait]
pub trait NsLookup: Send + Sync {
    async fn lookup_ns(&self, domain: &str) -> LookupOutcome;
}
