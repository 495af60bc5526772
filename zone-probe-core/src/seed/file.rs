//! 文本文件作为候选域名（一行一个）

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::traits::SeedSource;

/// One candidate per line; blank lines and `#` comments are skipped.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

#[async_trait]
impl SeedSource for FileSeedSource {
    fn name(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> CoreResult<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(parse_lines(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CoreError::SeedUnavailable(format!(
                "{} not found",
                self.path.display()
            ))),
            Err(e) => Err(CoreError::storage(
                &format!("failed to read {}", self.path.display()),
                &e,
            )),
        }
    }
}
