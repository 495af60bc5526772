//! `zone-probe` entry point
//!
//! Logs go to stderr; the purge zone listing goes to stdout.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zone_probe_core::{CoreError, ProbeConfig};

use cli::{Cli, Command};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug,hickory_proto=info,hickory_resolver=info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ProbeConfig> {
    let config = ProbeConfig::load(cli.config.as_deref())?.with_env();
    let config = cli.apply_overrides(config);
    config.validate()?;
    Ok(config)
}

async fn dispatch(cli: &Cli, config: &ProbeConfig) -> anyhow::Result<()> {
    match &cli.command {
        Command::Run { .. } => {
            let summary = commands::run(config).await?;
            tracing::info!("Run finished: {summary}");
        }
        Command::Classify { .. } => {
            let summary = commands::classify(config).await?;
            tracing::info!(
                "Classification finished: {} base domains, {} NXDOMAIN",
                summary.seed_count,
                summary.nxdomain_count
            );
        }
        Command::Purge { yes } => {
            if let Some(summary) = commands::purge(config, *yes).await? {
                tracing::info!(
                    "SUMMARY: deleted={} failed={} total={}",
                    summary.deleted,
                    summary.failed,
                    summary.total
                );
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let expected = e
                .downcast_ref::<CoreError>()
                .is_some_and(CoreError::is_expected);
            if expected {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
