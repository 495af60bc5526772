//! 目录文件名作为候选域名
//!
//! 种子仓库里每个文件名就是一个域名。目录不存在时可先 `git clone` 仓库。

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{CoreError, CoreResult};
use crate::traits::SeedSource;

/// Repository to clone when the seed directory is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoClone {
    pub url: String,
    /// Clone destination (the repository root, usually the parent of the seed directory).
    pub into: PathBuf,
}

/// Candidates are the names of regular files in a directory, sorted.
#[derive(Debug, Clone)]
pub struct DirectorySeedSource {
    dir: PathBuf,
    clone: Option<RepoClone>,
}

impl DirectorySeedSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            clone: None,
        }
    }

    /// Clone `url` into `into` first if the directory does not exist yet.
    #[must_use]
    pub fn with_clone(mut self, url: impl Into<String>, into: impl Into<PathBuf>) -> Self {
        self.clone = Some(RepoClone {
            url: url.into(),
            into: into.into(),
        });
        self
    }

    async fn clone_repo(repo: &RepoClone) {
        log::info!("Cloning {} into {}", repo.url, repo.into.display());
        let status = Command::new("git")
            .arg("clone")
            .arg(&repo.url)
            .arg(&repo.into)
            .status()
            .await;
        match status {
            Ok(s) if s.success() => log::info!("Clone finished"),
            Ok(s) => log::warn!("git clone exited with {s}"),
            Err(e) => log::warn!("Failed to run git clone: {e}"),
        }
    }
}

#[async_trait]
impl SeedSource for DirectorySeedSource {
    fn name(&self) -> String {
        format!("directory {}", self.dir.display())
    }

    async fn fetch(&self) -> CoreResult<Vec<String>> {
        let exists = tokio::fs::try_exists(&self.dir).await.unwrap_or(false);
        if !exists {
            if let Some(repo) = &self.clone {
                Self::clone_repo(repo).await;
            }
        }

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CoreError::SeedUnavailable(format!(
                    "{} not found",
                    self.dir.display()
                )));
            }
            Err(e) => {
                return Err(CoreError::storage(
                    &format!("failed to list {}", self.dir.display()),
                    &e,
                ));
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CoreError::storage(&format!("failed to list {}", self.dir.display()), &e))?
        {
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.trim().is_empty() => {}
                Ok(name) => names.push(name.trim().to_string()),
                Err(raw) => log::warn!("Skipping non-UTF-8 file name {raw:?}"),
            }
        }

        names.sort();
        log::info!("Found {} candidate files in {}", names.len(), self.dir.display());
        Ok(names)
    }
}
