use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MonitorRecord;

use super::MonitorStorage;

/// Monitor collection held in process memory, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStorage {
    monitors: Mutex<Vec<MonitorRecord>>,
}

impl MemoryStorage {
    pub fn new(monitors: Vec<MonitorRecord>) -> Self {
        Self {
            monitors: Mutex::new(monitors),
        }
    }
}

#[async_trait]
impl MonitorStorage for MemoryStorage {
    async fn read_all(&self) -> Result<Vec<MonitorRecord>> {
        let monitors = self
            .monitors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(monitors.clone())
    }

    async fn write_all(&self, monitors: &[MonitorRecord]) -> Result<()> {
        let mut stored = self
            .monitors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *stored = monitors.to_vec();
        Ok(())
    }
}
