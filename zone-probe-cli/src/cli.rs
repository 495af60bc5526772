//! Command line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zone_probe_core::seed::DEFAULT_REGISTRY_URL;
use zone_probe_core::ProbeConfig;

#[derive(Debug, Parser)]
#[command(
    name = "zone-probe",
    version,
    about = "Probe whether NXDOMAIN base domains can be claimed as zones"
)]
pub struct Cli {
    /// TOML config file (default: ./zone-probe.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the stage caches and ledgers
    #[arg(long, global = true)]
    pub workdir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Seed and naming overrides shared by the pipeline commands.
#[derive(Debug, Default, Clone, clap::Args)]
pub struct PipelineArgs {
    /// Label prepended to each candidate
    #[arg(long)]
    pub prefix: Option<String>,

    /// Directory whose file names are the candidates
    #[arg(long, conflicts_with = "seed_file")]
    pub seed_dir: Option<PathBuf>,

    /// File with one candidate per line
    #[arg(long, conflicts_with = "registry")]
    pub seed_file: Option<PathBuf>,

    /// Scrape a paginated domain registry (default: FreeDNS registry)
    #[arg(
        long,
        value_name = "URL",
        num_args = 0..=1,
        default_missing_value = DEFAULT_REGISTRY_URL,
        conflicts_with = "seed_dir"
    )]
    pub registry: Option<String>,

    /// Repository cloned when the seed directory is missing ("" disables)
    #[arg(long)]
    pub clone_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Full pipeline: seed, classify, probe
    Run {
        #[command(flatten)]
        args: PipelineArgs,
    },
    /// Seed and classify only (fills the caches, no provider calls)
    Classify {
        #[command(flatten)]
        args: PipelineArgs,
    },
    /// Delete every zone in the account
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Apply command line overrides, the highest-precedence layer.
    pub fn apply_overrides(&self, mut config: ProbeConfig) -> ProbeConfig {
        if let Some(workdir) = &self.workdir {
            config.paths.workdir.clone_from(workdir);
        }

        let args = match &self.command {
            Command::Run { args } | Command::Classify { args } => args,
            Command::Purge { .. } => return config,
        };
        if let Some(prefix) = &args.prefix {
            config.probe.prefix.clone_from(prefix);
        }
        if let Some(dir) = &args.seed_dir {
            config.seed.dir.clone_from(dir);
            config.seed.file = None;
            config.seed.registry_url = None;
        }
        if let Some(file) = &args.seed_file {
            config.seed.file = Some(file.clone());
        }
        if let Some(url) = &args.registry {
            config.seed.registry_url = Some(url.clone());
            config.seed.file = None;
        }
        if let Some(url) = &args.clone_url {
            config.seed.clone_url.clone_from(url);
        }
        config
    }
}
