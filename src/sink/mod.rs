//! Result sink: durable append of one JSON record per run.
//!
//! The pipeline is the only caller and guarantees record shape; the sink only
//! cares that the value is JSON-serializable. Append failures are reported
//! upward so the orchestrator can log them, but they never abort the process.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Narrow interface for durably appending a JSON record.
pub trait ResultSink {
    /// Append one record to the sink.
    fn append(&self, record: serde_json::Value) -> impl Future<Output = Result<()>> + Send;
}

/// Appends records as JSON lines to a local file.
///
/// Stands in for the hosted dataset store: one line per envelope, parent
/// directories created on first write.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ResultSink for JsonlSink {
    async fn append(&self, record: serde_json::Value) -> Result<()> {
        let mut line = serde_json::to_string(&record).context("Failed to serialize record")?;
        line.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create sink directory {}", parent.display()))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open sink file {}", self.path.display()))?;

        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to append to sink file {}", self.path.display()))?;
        file.flush().await.context("Failed to flush sink file")?;

        log::debug!("Appended record to {}", self.path.display());
        Ok(())
    }
}
