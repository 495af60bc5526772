//! Pipeline stage identifiers

use serde::{Deserialize, Serialize};

/// A cache-gated pipeline stage.
///
/// Probing is not a stage here: it always runs and has no cache artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// The raw candidate list produced by the seed collaborator.
    Seed,
    /// The subset of seed candidates classified as absent.
    Nxdomain,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Nxdomain => "nxdomain",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
