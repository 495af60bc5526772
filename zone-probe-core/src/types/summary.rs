//! 运行汇总

use serde::{Deserialize, Serialize};

/// Counters of the probe stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeStats {
    pub probed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cleanup_failures: usize,
    pub ledger_errors: usize,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub seed_count: usize,
    pub nxdomain_count: usize,
    pub probed: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful registrations whose zone may still be live.
    pub cleanup_failures: usize,
    /// Ledger appends that failed (the run continued).
    pub ledger_errors: usize,
    pub seed_cache_hit: bool,
    pub nxdomain_cache_hit: bool,
}

impl RunSummary {
    /// Fold probe-stage counters into the run summary.
    pub fn absorb(&mut self, stats: ProbeStats) {
        self.probed += stats.probed;
        self.succeeded += stats.succeeded;
        self.failed += stats.failed;
        self.cleanup_failures += stats.cleanup_failures;
        self.ledger_errors += stats.ledger_errors;
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seed={} nxdomain={} probed={} succeeded={} failed={} cleanup_failures={} ledger_errors={}",
            self.seed_count,
            self.nxdomain_count,
            self.probed,
            self.succeeded,
            self.failed,
            self.cleanup_failures,
            self.ledger_errors
        )
    }
}

/// Result of deleting every zone in the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeSummary {
    pub deleted: usize,
    pub failed: usize,
    pub total: usize,
}
