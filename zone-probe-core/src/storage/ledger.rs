//! 结果账本文件实现

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{CoreError, CoreResult};
use crate::traits::OutcomeLedger;
use crate::types::ProbeOutcome;

/// Two append-only text logs, one for successes and one for failures.
///
/// Every record opens the target in append+create mode and syncs before
/// returning, so a crash loses at most the line being written.
#[derive(Debug, Clone)]
pub struct FileLedger {
    success_path: PathBuf,
    failure_path: PathBuf,
}

impl FileLedger {
    #[must_use]
    pub fn new(success_path: impl Into<PathBuf>, failure_path: impl Into<PathBuf>) -> Self {
        Self {
            success_path: success_path.into(),
            failure_path: failure_path.into(),
        }
    }

    async fn append_line(path: &Path, line: &str) -> CoreResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| CoreError::storage(&format!("failed to open {}", path.display()), &e))?;

        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .await
            .map_err(|e| CoreError::storage(&format!("failed to append {}", path.display()), &e))?;
        file.sync_data()
            .await
            .map_err(|e| CoreError::storage(&format!("failed to sync {}", path.display()), &e))?;
        Ok(())
    }
}

#[async_trait]
impl OutcomeLedger for FileLedger {
    async fn record(&self, outcome: &ProbeOutcome) -> CoreResult<()> {
        let path = if outcome.success {
            &self.success_path
        } else {
            &self.failure_path
        };
        Self::append_line(path, &outcome.ledger_line()).await
    }
}
