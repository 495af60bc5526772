//! 运行配置
//!
//! 启动时构建一次的不可变配置，按值或 `Arc` 传入各个服务的构造函数。
//! 优先级（低 → 高）：内置默认值 < TOML 文件 < 环境变量（凭证）< 命令行参数。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zone_probe_provider::{CloudflareAuth, ProviderCredentials};

use crate::error::{CoreError, CoreResult};

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "zone-probe.toml";

/// Seed repository cloned when the seed directory is missing.
pub const DEFAULT_CLONE_URL: &str = "https://github.com/Hollow667/Site-Subdomains.git";

pub const ENV_API_EMAIL: &str = "CF_API_EMAIL";
pub const ENV_API_KEY: &str = "CF_API_KEY";
pub const ENV_API_TOKEN: &str = "CF_API_TOKEN";
pub const ENV_ACCOUNT_ID: &str = "CF_ACCOUNT_ID";

/// `[provider]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub auth: Option<CloudflareAuth>,
    pub account_id: Option<String>,
    /// Overrides the Cloudflare v4 endpoint (testing).
    pub api_base: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            auth: None,
            account_id: None,
            api_base: None,
            timeout_secs: 30,
        }
    }
}

/// `[paths]`: relative file names resolve against `workdir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub workdir: PathBuf,
    pub seed_cache: PathBuf,
    pub nxdomain_cache: PathBuf,
    pub success_log: PathBuf,
    pub failure_log: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            seed_cache: PathBuf::from("base_domains.txt"),
            nxdomain_cache: PathBuf::from("nxdomain_base_domains.txt"),
            success_log: PathBuf::from("add_cf_success.txt"),
            failure_log: PathBuf::from("add_cf_failed.txt"),
        }
    }
}

impl PathsConfig {
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    #[must_use]
    pub fn seed_cache_path(&self) -> PathBuf {
        self.resolve(&self.seed_cache)
    }

    #[must_use]
    pub fn nxdomain_cache_path(&self) -> PathBuf {
        self.resolve(&self.nxdomain_cache)
    }

    #[must_use]
    pub fn success_log_path(&self) -> PathBuf {
        self.resolve(&self.success_log)
    }

    #[must_use]
    pub fn failure_log_path(&self) -> PathBuf {
        self.resolve(&self.failure_log)
    }
}

/// `[seed]`: `file` wins over `registry_url`, which wins over `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub dir: PathBuf,
    pub file: Option<PathBuf>,
    /// Paginated registry to scrape instead of listing `dir`.
    pub registry_url: Option<String>,
    /// Empty disables cloning.
    pub clone_url: String,
    /// Clone destination; defaults to the parent of `dir`.
    pub clone_into: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Site-Subdomains/Domains"),
            file: None,
            registry_url: None,
            clone_url: DEFAULT_CLONE_URL.to_string(),
            clone_into: None,
        }
    }
}

/// Where the candidate list comes from, after path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedPlan {
    File(PathBuf),
    Registry(String),
    Directory {
        dir: PathBuf,
        clone: Option<(String, PathBuf)>,
    },
}

/// `[probe]`: delays and timeouts in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub prefix: String,
    pub request_delay_ms: u64,
    pub dns_delay_ms: u64,
    pub dns_timeout_ms: u64,
    pub purge_delay_ms: u64,
    /// Pause between registry pages.
    pub scrape_delay_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            prefix: "exsub".to_string(),
            request_delay_ms: 1000,
            dns_delay_ms: 100,
            dns_timeout_ms: 5000,
            purge_delay_ms: 500,
            scrape_delay_ms: 1000,
        }
    }
}

impl ProbeSettings {
    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub fn dns_delay(&self) -> Duration {
        Duration::from_millis(self.dns_delay_ms)
    }

    #[must_use]
    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    #[must_use]
    pub fn purge_delay(&self) -> Duration {
        Duration::from_millis(self.purge_delay_ms)
    }

    #[must_use]
    pub fn scrape_delay(&self) -> Duration {
        Duration::from_millis(self.scrape_delay_ms)
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub provider: ProviderConfig,
    pub paths: PathsConfig,
    pub seed: SeedConfig,
    pub probe: ProbeSettings,
}

impl ProbeConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigError(e.to_string()))
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists.
    ///
    /// An explicitly given file must exist; a missing default file means
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(CoreError::ConfigError(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            log::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CoreError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            CoreError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overlay credentials from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay credentials from `lookup`. Token beats email + key; partial
    /// email/key pairs are ignored.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_API_TOKEN) {
            self.provider.auth = Some(CloudflareAuth::ApiToken { token });
        } else if let (Some(email), Some(api_key)) = (get(ENV_API_EMAIL), get(ENV_API_KEY)) {
            self.provider.auth = Some(CloudflareAuth::ApiKey { email, api_key });
        }
        if let Some(account_id) = get(ENV_ACCOUNT_ID) {
            self.provider.account_id = Some(account_id);
        }
        self
    }

    /// Credentials for commands that talk to the provider.
    pub fn credentials(&self) -> CoreResult<ProviderCredentials> {
        let auth = self.provider.auth.clone().ok_or_else(|| {
            CoreError::ConfigError(format!(
                "missing provider credentials (set {ENV_API_EMAIL} + {ENV_API_KEY} or {ENV_API_TOKEN})"
            ))
        })?;
        let account_id = self
            .provider
            .account_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                CoreError::ConfigError(format!("missing account id (set {ENV_ACCOUNT_ID})"))
            })?;
        Ok(ProviderCredentials::Cloudflare { auth, account_id })
    }

    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Resolved seed source.
    #[must_use]
    pub fn seed_plan(&self) -> SeedPlan {
        if let Some(file) = &self.seed.file {
            return SeedPlan::File(self.paths.resolve(file));
        }
        let registry = self.seed.registry_url.as_deref().map(str::trim);
        if let Some(url) = registry.filter(|u| !u.is_empty()) {
            return SeedPlan::Registry(url.to_string());
        }

        let dir = self.paths.resolve(&self.seed.dir);
        let clone = (!self.seed.clone_url.trim().is_empty()).then(|| {
            let into = match &self.seed.clone_into {
                Some(into) => self.paths.resolve(into),
                None => dir
                    .parent()
                    .map_or_else(|| self.paths.workdir.clone(), Path::to_path_buf),
            };
            (self.seed.clone_url.clone(), into)
        });
        SeedPlan::Directory { dir, clone }
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        let prefix = &self.probe.prefix;
        if prefix.is_empty()
            || prefix.starts_with('.')
            || prefix.ends_with('.')
            || prefix.chars().any(char::is_whitespace)
        {
            return Err(CoreError::ConfigError(format!(
                "invalid zone prefix {prefix:?}"
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.probe.dns_timeout_ms == 0 {
            return Err(CoreError::ConfigError(
                "probe.dns_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
