use std::path::{Path, PathBuf};

use async_trait::async_trait;

use tokio::fs;

use crate::error::Result;
use crate::model::MonitorRecord;

use super::MonitorStorage;

/// Monitor collection kept as a JSON array in a local file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data file, and its directory, holding an empty collection
    async fn ensure_exists(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }
        if fs::metadata(&self.path).await.is_err() {
            fs::write(&self.path, "[]").await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MonitorStorage for FileStorage {
    #[tracing::instrument(name = "Read monitors from file")]
    async fn read_all(&self) -> Result<Vec<MonitorRecord>> {
        self.ensure_exists().await?;

        let contents = fs::read(&self.path).await?;
        let monitors = serde_json::from_slice(&contents)?;
        Ok(monitors)
    }

    #[tracing::instrument(name = "Write monitors to file", skip(monitors))]
    async fn write_all(&self, monitors: &[MonitorRecord]) -> Result<()> {
        let contents = serde_json::to_vec_pretty(monitors)?;
        fs::write(&self.path, contents).await?;
        Ok(())
    }
}
