//! 阶段缓存文件实现
//!
//! 每个阶段一个文本文件，一行一个域名。写入走 tmp + rename，
//! 中断的写入只会留下 `.tmp` 文件，不会被下次运行当作完整缓存。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{CoreError, CoreResult};
use crate::traits::StageStore;
use crate::types::Stage;

/// File-backed [`StageStore`].
#[derive(Debug, Clone)]
pub struct FileStageCache {
    seed_path: PathBuf,
    nxdomain_path: PathBuf,
}

impl FileStageCache {
    #[must_use]
    pub fn new(seed_path: impl Into<PathBuf>, nxdomain_path: impl Into<PathBuf>) -> Self {
        Self {
            seed_path: seed_path.into(),
            nxdomain_path: nxdomain_path.into(),
        }
    }

    /// Location of a stage's cache file.
    #[must_use]
    pub fn path_for(&self, stage: Stage) -> &Path {
        match stage {
            Stage::Seed => &self.seed_path,
            Stage::Nxdomain => &self.nxdomain_path,
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl StageStore for FileStageCache {
    async fn load(&self, stage: Stage) -> CoreResult<Option<Vec<String>>> {
        let path = self.path_for(stage);
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::storage(
                    &format!("failed to read {}", path.display()),
                    &e,
                ));
            }
        };

        // 只去掉行尾换行符，条目本身原样返回
        let items: Vec<String> = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();

        log::debug!(
            "Loaded {} {stage} entries from {}",
            items.len(),
            path.display()
        );
        Ok(Some(items))
    }

    async fn save(&self, stage: Stage, items: &[String]) -> CoreResult<()> {
        let path = self.path_for(stage);
        let tmp = tmp_path(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::storage(&format!("failed to create {}", parent.display()), &e)
            })?;
        }

        let mut body = String::with_capacity(items.iter().map(|s| s.len() + 1).sum());
        for item in items {
            body.push_str(item);
            body.push('\n');
        }

        let mut file = tokio::fs::File::create(&tmp)
            .await
            .map_err(|e| CoreError::storage(&format!("failed to create {}", tmp.display()), &e))?;
        file.write_all(body.as_bytes())
            .await
            .map_err(|e| CoreError::storage(&format!("failed to write {}", tmp.display()), &e))?;
        file.sync_all()
            .await
            .map_err(|e| CoreError::storage(&format!("failed to sync {}", tmp.display()), &e))?;
        drop(file);

        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            CoreError::storage(
                &format!("failed to move {} -> {}", tmp.display(), path.display()),
                &e,
            )
        })?;

        log::info!("Saved {} {stage} entries to {}", items.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> FileStageCache {
        FileStageCache::new(
            dir.path().join("base_domains.txt"),
            dir.path().join("nxdomain_base_domains.txt"),
        )
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        assert_eq!(cache.load(Stage::Seed).await.unwrap(), None);
        assert_eq!(cache.load(Stage::Nxdomain).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        let items: Vec<String> = ["b.test", "a.test", "b.test"]
            .iter()
            .map(ToString::to_string)
            .collect();

        cache.save(Stage::Seed, &items).await.unwrap();

        assert_eq!(cache.load(Stage::Seed).await.unwrap(), Some(items));
        assert_eq!(cache.load(Stage::Nxdomain).await.unwrap(), None);
        let raw = std::fs::read_to_string(dir.path().join("base_domains.txt")).unwrap();
        assert_eq!(raw, "b.test\na.test\nb.test\n");
        assert!(!dir.path().join("base_domains.txt.tmp").exists());
    }

    #[tokio::test]
    async fn empty_list_is_a_present_cache() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.save(Stage::Nxdomain, &[]).await.unwrap();
        assert_eq!(cache.load(Stage::Nxdomain).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn surrounding_whitespace_survives_a_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        let items = vec![" lead.test".to_string(), "trail.test ".to_string()];

        cache.save(Stage::Seed, &items).await.unwrap();

        assert_eq!(cache.load(Stage::Seed).await.unwrap(), Some(items));
    }

    #[tokio::test]
    async fn hand_edited_file_loses_only_line_endings_and_blanks() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("base_domains.txt"), "a.test\r\n\nb.test\n").unwrap();
        let cache = cache_in(&dir);
        assert_eq!(
            cache.load(Stage::Seed).await.unwrap(),
            Some(vec!["a.test".to_string(), "b.test".to_string()])
        );
    }

    #[tokio::test]
    async fn leftover_tmp_file_is_not_a_cache() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("base_domains.txt.tmp"), "partial.test\n").unwrap();
        let cache = cache_in(&dir);
        assert_eq!(cache.load(Stage::Seed).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_overwrites_previous_cache() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);
        cache.save(Stage::Seed, &["old.test".to_string()]).await.unwrap();
        cache.save(Stage::Seed, &["new.test".to_string()]).await.unwrap();
        assert_eq!(
            cache.load(Stage::Seed).await.unwrap(),
            Some(vec!["new.test".to_string()])
        );
    }
}
