mod file;
mod memory;
mod monitors;
mod remote;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MonitorRecord;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use monitors::MonitorRepo;
pub use remote::RemoteStorage;

/// Backing store for the monitor collection.
///
/// Every backend reads and overwrites the whole collection at once.
#[async_trait]
pub trait MonitorStorage: Send + Sync + std::fmt::Debug {
    /// Read the full collection
    async fn read_all(&self) -> Result<Vec<MonitorRecord>>;
    /// Replace the full collection
    async fn write_all(&self, monitors: &[MonitorRecord]) -> Result<()>;
}
