//! Zone Probe Core Library
//!
//! The resumable probing pipeline:
//! - Seed acquisition (directory listing, line file or registry scrape), cached on disk
//! - NS existence classification, cached on disk
//! - Zone registration probing with immediate cleanup
//! - Append-only outcome ledgers
//!
//! Storage and network are reached through the traits in [`traits`], so the
//! services run the same against files and resolvers or against test mocks.

pub mod config;
pub mod dns;
pub mod error;
pub mod seed;
pub mod services;
pub mod storage;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::ProbeConfig;
pub use error::{CoreError, CoreResult};
pub use services::{PipelineService, ProbeService, PurgeService, ServiceContext};
pub use traits::{NsLookup, OutcomeLedger, SeedSource, StageStore};
