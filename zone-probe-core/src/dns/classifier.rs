//! Present / absent classification of candidates

use std::sync::Arc;

use crate::traits::NsLookup;
use crate::types::{Classification, LookupOutcome};

/// Map a lookup outcome to a classification.
///
/// `NoSuchName` and `NoRecords` are the only absent outcomes. Timeouts and
/// errors count as present so an uncertain domain is never probed.
#[must_use]
pub fn classify_outcome(outcome: &LookupOutcome) -> Classification {
    match outcome {
        LookupOutcome::NoSuchName | LookupOutcome::NoRecords => Classification::Absent,
        LookupOutcome::RecordsFound(_) | LookupOutcome::Timeout | LookupOutcome::Error(_) => {
            Classification::Present
        }
    }
}

/// Classifies one candidate per call. No retries.
pub struct DnsClassifier {
    lookup: Arc<dyn NsLookup>,
}

impl DnsClassifier {
    #[must_use]
    pub fn new(lookup: Arc<dyn NsLookup>) -> Self {
        Self { lookup }
    }

    pub async fn classify(&self, domain: &str) -> Classification {
        let outcome = self.lookup.lookup_ns(domain).await;
        if let Some(warning) = fallback_warning(domain, &outcome) {
            log::warn!("{warning}");
        } else if let LookupOutcome::RecordsFound(ns) = &outcome {
            log::debug!("{domain} NS: {}", ns.join(", "));
        }
        classify_outcome(&outcome)
    }
}

/// Operator warning for outcomes that fall back to "present".
fn fallback_warning(domain: &str, outcome: &LookupOutcome) -> Option<String> {
    match outcome {
        LookupOutcome::Timeout => Some(format!("Timeout checking {domain}, treating as existing")),
        LookupOutcome::Error(e) => {
            Some(format!("Error checking {domain}: {e}, treating as existing"))
        }
        LookupOutcome::RecordsFound(_) | LookupOutcome::NoSuchName | LookupOutcome::NoRecords => {
            None
        }
    }
}
