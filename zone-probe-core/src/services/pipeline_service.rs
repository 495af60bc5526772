//! 流水线编排服务
//!
//! AcquireSeed → Classify → Probe，前两个阶段由阶段缓存把关：
//! 缓存存在就直接使用，不做任何外部调用。Probe 阶段每次都完整执行。

use std::sync::Arc;

use crate::dns::DnsClassifier;
use crate::error::{CoreError, CoreResult};
use crate::services::{derive_name, ProbeService, ServiceContext};
use crate::traits::{OutcomeLedger, SeedSource, StageStore};
use crate::types::{ProbeStats, RunSummary, Stage};
use crate::utils::Pacer;

/// Items produced by a cache-gated stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub items: Vec<String>,
    /// The items came from an existing cache artifact.
    pub cache_hit: bool,
}

/// Sequences the pipeline stages.
pub struct PipelineService {
    seed_source: Arc<dyn SeedSource>,
    stage_store: Arc<dyn StageStore>,
    ledger: Arc<dyn OutcomeLedger>,
    classifier: DnsClassifier,
    prober: Option<ProbeService>,
    dns_pacer: Pacer,
    request_pacer: Pacer,
}

impl PipelineService {
    /// 创建流水线服务（不含探测器，只能运行前两个阶段）
    #[must_use]
    pub fn new(ctx: ServiceContext, dns_pacer: Pacer, request_pacer: Pacer) -> Self {
        Self {
            seed_source: ctx.seed_source,
            stage_store: ctx.stage_store,
            ledger: ctx.ledger,
            classifier: DnsClassifier::new(ctx.ns_lookup),
            prober: None,
            dns_pacer,
            request_pacer,
        }
    }

    /// 注入探测器，启用 Probe 阶段
    #[must_use]
    pub fn with_prober(mut self, prober: ProbeService) -> Self {
        self.prober = Some(prober);
        self
    }

    /// Seed stage: cached list, or fetch from the seed source and cache it.
    pub async fn acquire_seed(&self) -> CoreResult<StageOutput> {
        if let Some(items) = self.stage_store.load(Stage::Seed).await? {
            log::info!("Loaded {} base domains from cache", items.len());
            return Ok(StageOutput {
                items,
                cache_hit: true,
            });
        }

        log::info!("Fetching candidates from {}", self.seed_source.name());
        let items = self.seed_source.fetch().await?;
        self.stage_store.save(Stage::Seed, &items).await?;
        Ok(StageOutput {
            items,
            cache_hit: false,
        })
    }

    /// Classify stage: cached absent list, or classify every seed candidate.
    pub async fn classify_candidates(&self, seed: &[String]) -> CoreResult<StageOutput> {
        if let Some(items) = self.stage_store.load(Stage::Nxdomain).await? {
            log::info!("Loaded {} NXDOMAIN domains from cache", items.len());
            return Ok(StageOutput {
                items,
                cache_hit: true,
            });
        }

        log::info!("Checking DNS for {} candidates", seed.len());
        let total = seed.len();
        let mut absent = Vec::new();
        for (i, domain) in seed.iter().enumerate() {
            let classification = self.classifier.classify(domain).await;
            if classification.is_absent() {
                log::info!("[{}/{total}] Checking {domain}... NXDOMAIN", i + 1);
                absent.push(domain.clone());
            } else {
                log::info!("[{}/{total}] Checking {domain}... EXISTS (skipping)", i + 1);
            }
            self.dns_pacer.pause().await;
        }

        self.stage_store.save(Stage::Nxdomain, &absent).await?;
        Ok(StageOutput {
            items: absent,
            cache_hit: false,
        })
    }

    /// Probe stage: probe every candidate in order and record each outcome.
    ///
    /// Individual failures never stop the loop; ledger write errors are
    /// logged and counted.
    ///
    /// # Errors
    /// * `CoreError::ConfigError` - no prober was configured
    pub async fn probe_candidates(&self, candidates: &[String]) -> CoreResult<ProbeStats> {
        let prober = self.prober.as_ref().ok_or_else(|| {
            CoreError::ConfigError("provider credentials are required for probing".to_string())
        })?;

        let total = candidates.len();
        log::info!("Testing registration for {total} domains");
        let mut stats = ProbeStats::default();

        for (i, candidate) in candidates.iter().enumerate() {
            log::info!(
                "[{}/{total}] Testing: {}",
                i + 1,
                derive_name(prober.prefix(), candidate)
            );

            let outcome = prober.probe(candidate).await;
            stats.probed += 1;
            if outcome.success {
                stats.succeeded += 1;
            } else {
                stats.failed += 1;
            }
            if outcome.cleanup.needs_manual_cleanup() {
                stats.cleanup_failures += 1;
            }

            if let Err(e) = self.ledger.record(&outcome).await {
                log::error!("Failed to record outcome for {}: {e}", outcome.derived_name);
                stats.ledger_errors += 1;
            }

            if i + 1 < total {
                self.request_pacer.pause().await;
            }
        }

        Ok(stats)
    }

    /// AcquireSeed and Classify only; no provider calls.
    pub async fn run_classify(&self) -> CoreResult<RunSummary> {
        let mut summary = RunSummary::default();
        let Some(candidates) = self.seed_and_classify(&mut summary).await? else {
            return Ok(summary);
        };
        log::info!("Found {} NXDOMAIN domains", candidates.len());
        Ok(summary)
    }

    /// Full run: AcquireSeed → Classify → Probe.
    pub async fn run(&self) -> CoreResult<RunSummary> {
        if self.prober.is_none() {
            return Err(CoreError::ConfigError(
                "provider credentials are required for probing".to_string(),
            ));
        }

        let mut summary = RunSummary::default();
        let Some(candidates) = self.seed_and_classify(&mut summary).await? else {
            return Ok(summary);
        };

        let stats = self.probe_candidates(&candidates).await?;
        summary.absorb(stats);

        log::info!(
            "SUMMARY: success={} failed={} total={}",
            summary.succeeded,
            summary.failed,
            summary.probed
        );
        if summary.cleanup_failures > 0 {
            log::warn!(
                "{} registered zone(s) could not be cleaned up, remove them manually",
                summary.cleanup_failures
            );
        }
        if summary.ledger_errors > 0 {
            log::warn!("{} outcome(s) could not be written to the ledger", summary.ledger_errors);
        }
        Ok(summary)
    }

    /// Runs the two cached stages. `None` means there is nothing left to probe.
    async fn seed_and_classify(&self, summary: &mut RunSummary) -> CoreResult<Option<Vec<String>>> {
        let seed = self.acquire_seed().await?;
        summary.seed_count = seed.items.len();
        summary.seed_cache_hit = seed.cache_hit;
        if seed.items.is_empty() {
            log::warn!("No domains found!");
            return Ok(None);
        }
        log::info!("Found {} base domains", seed.items.len());

        let nxdomain = self.classify_candidates(&seed.items).await?;
        summary.nxdomain_count = nxdomain.items.len();
        summary.nxdomain_cache_hit = nxdomain.cache_hit;
        if nxdomain.items.is_empty() {
            log::warn!("No NXDOMAIN domains found!");
            return Ok(None);
        }
        Ok(Some(nxdomain.items))
    }
}
