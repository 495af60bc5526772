//! hickory-resolver backed NS lookups

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::{
    config::{ResolverConfig, ResolverOpts},
    name_server::TokioConnectionProvider,
    proto::ProtoErrorKind,
    ResolveError, TokioResolver,
};

use crate::traits::NsLookup;
use crate::types::LookupOutcome;

/// Per-lookup deadline when none is configured.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// [`NsLookup`] over a tokio hickory resolver.
///
/// Each query is attempted once and bounded both by the resolver's own
/// timeout and by an outer deadline.
pub struct HickoryNsLookup {
    resolver: TokioResolver,
    deadline: Duration,
}

impl HickoryNsLookup {
    /// Resolver from the host system configuration (falls back to hickory defaults).
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            resolver: build_system_resolver(timeout),
            deadline: timeout,
        }
    }
}

impl Default for HickoryNsLookup {
    fn default() -> Self {
        Self::new(DEFAULT_DNS_TIMEOUT)
    }
}

fn apply_opts(opts: &mut ResolverOpts, timeout: Duration) {
    opts.timeout = timeout;
    opts.attempts = 1;
}

fn build_system_resolver(timeout: Duration) -> TokioResolver {
    #[cfg(any(unix, target_os = "windows"))]
    {
        match TokioResolver::builder_tokio() {
            Ok(mut builder) => {
                apply_opts(builder.options_mut(), timeout);
                return builder.build();
            }
            Err(e) => {
                log::warn!(
                    "Failed to load system DNS configuration, falling back to defaults: {e}"
                );
            }
        }
    }

    let mut opts = ResolverOpts::default();
    apply_opts(&mut opts, timeout);
    TokioResolver::builder_with_config(
        ResolverConfig::default(),
        TokioConnectionProvider::default(),
    )
    .with_options(opts)
    .build()
}

/// Fully qualified form, so search domains never apply.
fn absolute(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

/// Map a resolver error to a lookup outcome.
pub(crate) fn outcome_from_error(err: &ResolveError) -> LookupOutcome {
    if err.is_nx_domain() {
        return LookupOutcome::NoSuchName;
    }
    if err.is_no_records_found() {
        return LookupOutcome::NoRecords;
    }
    if let Some(proto) = err.proto() {
        if matches!(proto.kind(), ProtoErrorKind::Timeout) {
            return LookupOutcome::Timeout;
        }
    }
    LookupOutcome::Error(err.to_string())
}

#[async_trait]
impl NsLookup for HickoryNsLookup {
    async fn lookup_ns(&self, domain: &str) -> LookupOutcome {
        let name = absolute(domain);
        match tokio::time::timeout(self.deadline, self.resolver.ns_lookup(name.as_str())).await {
            Err(_) => LookupOutcome::Timeout,
            Ok(Err(e)) => outcome_from_error(&e),
            Ok(Ok(response)) => {
                let targets: Vec<String> = response
                    .iter()
                    .map(|ns| ns.to_string().trim_end_matches('.').to_string())
                    .collect();
                if targets.is_empty() {
                    LookupOutcome::NoRecords
                } else {
                    LookupOutcome::RecordsFound(targets)
                }
            }
        }
    }
}
