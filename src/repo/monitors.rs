use std::sync::Arc;

use crate::model::MonitorRecord;

use super::MonitorStorage;

/// Repository for the monitor collection.
///
/// Every operation reloads the whole collection from storage; concurrent
/// writers are not coordinated and the last write wins.
#[derive(Debug, Clone)]
pub struct MonitorRepo {
    storage: Arc<dyn MonitorStorage>,
}

impl MonitorRepo {
    pub fn new(storage: Arc<dyn MonitorStorage>) -> Self {
        Self { storage }
    }

    /// Everything currently persisted, or nothing if the store cannot be read
    #[tracing::instrument(name = "List all monitors", skip(self))]
    pub async fn list(&self) -> Vec<MonitorRecord> {
        match self.storage.read_all().await {
            Ok(monitors) => monitors,
            Err(error) => {
                tracing::warn!(
                    error.cause_chain = ?error,
                    "Failed to read monitors, treating the collection as empty"
                );
                Vec::new()
            }
        }
    }

    /// Persisted monitors flagged active
    pub async fn active(&self) -> Vec<MonitorRecord> {
        self.list()
            .await
            .into_iter()
            .filter(|monitor| monitor.active)
            .collect()
    }

    /// Add a record to the end of the collection
    #[tracing::instrument(name = "Append a monitor", skip(self, monitor), fields(monitor.id = %monitor.id))]
    pub async fn append(&self, monitor: MonitorRecord) {
        let mut monitors = self.list().await;
        monitors.push(monitor);
        self.persist(&monitors).await;
    }

    /// Remove the first record with the given id, returning whether one was found
    #[tracing::instrument(name = "Remove a monitor by id", skip(self))]
    pub async fn remove_by_id(&self, id: &str) -> bool {
        let mut monitors = self.list().await;
        let Some(index) = monitors.iter().position(|monitor| monitor.id == id) else {
            return false;
        };

        monitors.remove(index);
        self.persist(&monitors).await;
        true
    }

    async fn persist(&self, monitors: &[MonitorRecord]) {
        if let Err(error) = self.storage.write_all(monitors).await {
            tracing::error!(error.cause_chain = ?error, "Failed to write monitors");
        }
    }
}
