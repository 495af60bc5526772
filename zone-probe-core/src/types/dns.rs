//! DNS 分类相关类型

use serde::{Deserialize, Serialize};

/// Result of one nameserver-record lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// At least one NS record came back (targets without the trailing dot).
    RecordsFound(Vec<String>),
    /// NXDOMAIN
    NoSuchName,
    /// NOERROR with an empty answer section.
    NoRecords,
    /// The lookup did not finish within its deadline.
    Timeout,
    /// Any other resolver failure.
    Error(String),
}

/// Nameserver presence of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The domain has (or may have) authoritative nameservers.
    Present,
    /// No nameserver presence; a probing candidate.
    Absent,
}

impl Classification {
    #[must_use]
    pub fn is_absent(self) -> bool {
        self == Self::Absent
    }
}
