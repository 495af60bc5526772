//! Subcommand implementations: wire concrete adapters into the core services.

use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{console::Term, Input};
use zone_probe_core::config::SeedPlan;
use zone_probe_core::dns::HickoryNsLookup;
use zone_probe_core::seed::{DirectorySeedSource, FileSeedSource, RegistrySeedSource};
use zone_probe_core::storage::{FileLedger, FileStageCache};
use zone_probe_core::traits::SeedSource;
use zone_probe_core::types::{PurgeSummary, RunSummary};
use zone_probe_core::utils::Pacer;
use zone_probe_core::{PipelineService, ProbeConfig, ProbeService, PurgeService, ServiceContext};
use zone_probe_provider::{create_provider_with, ZoneProvider};

/// Phrase the operator must type before a purge.
pub const PURGE_CONFIRMATION: &str = "DELETE ALL";

fn seed_source(config: &ProbeConfig) -> Result<Arc<dyn SeedSource>> {
    let source: Arc<dyn SeedSource> = match config.seed_plan() {
        SeedPlan::File(path) => Arc::new(FileSeedSource::new(path)),
        SeedPlan::Registry(url) => Arc::new(RegistrySeedSource::new(
            url,
            Pacer::new(config.probe.scrape_delay()),
        )?),
        SeedPlan::Directory { dir, clone } => {
            let source = DirectorySeedSource::new(dir);
            match clone {
                Some((url, into)) => Arc::new(source.with_clone(url, into)),
                None => Arc::new(source),
            }
        }
    };
    Ok(source)
}

fn build_provider(config: &ProbeConfig) -> Result<Arc<dyn ZoneProvider>> {
    let credentials = config.credentials()?;
    let provider = create_provider_with(
        credentials,
        config.provider.api_base.clone(),
        config.provider_timeout(),
    )?;
    Ok(provider)
}

async fn build_pipeline(config: &ProbeConfig) -> Result<PipelineService> {
    let paths = &config.paths;
    tokio::fs::create_dir_all(&paths.workdir)
        .await
        .with_context(|| format!("failed to create {}", paths.workdir.display()))?;

    let ctx = ServiceContext::new(
        seed_source(config)?,
        Arc::new(FileStageCache::new(
            paths.seed_cache_path(),
            paths.nxdomain_cache_path(),
        )),
        Arc::new(HickoryNsLookup::new(config.probe.dns_timeout())),
        Arc::new(FileLedger::new(
            paths.success_log_path(),
            paths.failure_log_path(),
        )),
    );
    Ok(PipelineService::new(
        ctx,
        Pacer::new(config.probe.dns_delay()),
        Pacer::new(config.probe.request_delay()),
    ))
}

pub async fn run(config: &ProbeConfig) -> Result<RunSummary> {
    // 凭证缺失时在任何外部调用之前失败
    let provider = build_provider(config)?;
    let account_id = config.credentials()?.account_id().to_string();
    let prober = ProbeService::new(provider, account_id, config.probe.prefix.clone());

    let pipeline = build_pipeline(config).await?.with_prober(prober);
    let summary = pipeline.run().await?;

    tracing::info!("Results saved to:");
    tracing::info!("  - {}", config.paths.success_log_path().display());
    tracing::info!("  - {}", config.paths.failure_log_path().display());
    Ok(summary)
}

pub async fn classify(config: &ProbeConfig) -> Result<RunSummary> {
    let pipeline = build_pipeline(config).await?;
    let summary = pipeline.run_classify().await?;
    tracing::info!(
        "NXDOMAIN list: {}",
        config.paths.nxdomain_cache_path().display()
    );
    Ok(summary)
}

/// Returns `None` when there was nothing to delete or the operator cancelled.
pub async fn purge(config: &ProbeConfig, assume_yes: bool) -> Result<Option<PurgeSummary>> {
    let provider = build_provider(config)?;
    let service = PurgeService::new(provider, Pacer::new(config.probe.purge_delay()));

    let zones = service
        .list_all_zones()
        .await
        .context("failed to list zones")?;
    if zones.is_empty() {
        tracing::info!("No zones found in account.");
        return Ok(None);
    }

    println!("Found {} zone(s) in account:", zones.len());
    for (i, zone) in zones.iter().enumerate() {
        println!("{}. {} (ID: {})", i + 1, zone.name, zone.id);
    }

    if !assume_yes && !confirm_purge()? {
        tracing::info!("Deletion cancelled.");
        return Ok(None);
    }

    Ok(Some(service.delete_zones(&zones).await))
}

fn confirm_purge() -> Result<bool> {
    let term = Term::stderr();
    term.write_line("WARNING: This will DELETE ALL zones listed above!")?;
    let answer: String = Input::new()
        .with_prompt(format!("Type '{PURGE_CONFIRMATION}' to confirm"))
        .allow_empty(true)
        .interact_text_on(&term)?;
    Ok(is_confirmed(&answer))
}

fn is_confirmed(answer: &str) -> bool {
    answer == PURGE_CONFIRMATION
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn confirmation_is_exact() {
        assert!(is_confirmed("DELETE ALL"));
        assert!(!is_confirmed("delete all"));
        assert!(!is_confirmed("DELETE ALL "));
        assert!(!is_confirmed(""));
    }

    #[test]
    fn missing_credentials_fail_before_anything_else() {
        let err = build_provider(&ProbeConfig::default()).err().unwrap();
        assert!(err.to_string().contains("missing provider credentials"));
    }

    #[tokio::test]
    async fn classify_with_cached_stages_touches_no_network() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("base_domains.txt"), "a.test\nb.test\n").unwrap();
        std::fs::write(dir.path().join("nxdomain_base_domains.txt"), "b.test\n").unwrap();

        let mut config = ProbeConfig::default();
        config.paths.workdir = PathBuf::from(dir.path());
        config.seed.clone_url = String::new();

        let summary = classify(&config).await.unwrap();

        assert_eq!(summary.seed_count, 2);
        assert_eq!(summary.nxdomain_count, 1);
        assert!(summary.seed_cache_hit && summary.nxdomain_cache_hit);
    }
}
