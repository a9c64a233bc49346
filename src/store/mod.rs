pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{NewRecord, Record};

pub use memory::MemoryStore;

/// Append-only sink for validation records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, record: NewRecord) -> Result<Record>;

    /// Balance of the newest record for `address`, compared case-insensitively.
    async fn latest_balance(&self, address: &str) -> Result<Option<f64>>;
}
